/// Word and name generation integration tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use telisar::language::grammar::LanguageError;
use telisar::language::{tongues, Ancestry, Language, LanguageDef, NameGenerator};

#[test]
fn language_loads_from_ron() {
    let goblin = Language::load_from_ron(Path::new("tests/fixtures/goblin.ron")).unwrap();
    assert_eq!(goblin.name(), "Goblin");
    assert_eq!(goblin.syllable_weights(), &[1, 3, 1]);
    assert!(goblin.is_valid_grapheme("sh"));
    assert!(goblin.is_valid_grapheme("ug"));
    assert!(goblin.is_valid_word("Grukug"));
    assert!(!goblin.is_valid_word("gruuk"));
    assert!(!goblin.is_valid_word("ka"));
}

#[test]
fn ron_words_follow_the_definition() {
    let goblin = Language::load_from_ron(Path::new("tests/fixtures/goblin.ron")).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let words: Vec<String> = goblin.words(&mut rng).take(100).collect();
    assert_eq!(words.len(), 100);
    for word in &words {
        assert!(word.chars().count() >= 3, "{word}");
        assert!(!word.contains("aa") && !word.contains("uu") && !word.contains("oo"), "{word}");
        assert!(word.chars().all(|c| "aougkrzsht".contains(c)), "{word}");
    }
}

#[test]
fn bad_definitions() {
    let def = LanguageDef::parse_ron(
        r#"(name: "Broken", vowels: [(text: "a")], consonants: [(text: "k")],
            syllable_template: "CVq", syllable_weights: [1])"#,
    )
    .unwrap();
    assert!(matches!(
        Language::from_def(def),
        Err(LanguageError::InvalidTemplate { indicator: 'q', .. })
    ));

    assert!(matches!(
        Language::parse_ron(
            r#"(name: "Broken", vowels: [(text: "a")], consonants: [(text: "k")],
                syllable_template: "CV", syllable_weights: [1], pattern: Some("["))"#,
        ),
        Err(LanguageError::Regex(_))
    ));

    assert!(matches!(
        Language::parse_ron("(name: \"Broken\")"),
        Err(LanguageError::Ron(_))
    ));

    assert!(matches!(
        Language::load_from_ron(Path::new("tests/fixtures/missing.ron")),
        Err(LanguageError::Io(_))
    ));
}

#[test]
fn seeded_names_are_reproducible() {
    for ancestry in Ancestry::ALL {
        let generator = NameGenerator::new(ancestry).unwrap();
        let first: Vec<String> = generator
            .names(&mut StdRng::seed_from_u64(1917))
            .take(5)
            .map(|name| name.to_string())
            .collect();
        let second: Vec<String> = generator
            .names(&mut StdRng::seed_from_u64(1917))
            .take(5)
            .map(|name| name.to_string())
            .collect();
        assert_eq!(first, second, "{ancestry}");
    }
}

#[test]
fn known_names() {
    let dwarvish = NameGenerator::new(Ancestry::Dwarvish).unwrap();
    assert!(dwarvish.is_valid_name("Moradin"));
    assert!(dwarvish.is_valid_name("Ultar Ultarsson"));

    let elven = NameGenerator::new(Ancestry::Elven).unwrap();
    let elven_words = tongues::elven().unwrap();
    for name in ["Ara am Akiir", "Elstuvian am Vakarilithien"] {
        assert!(elven.is_valid_name(name), "{name}");
        for word in name.split_whitespace() {
            assert!(elven_words.is_valid_word(word), "{word}");
        }
    }

    let common = NameGenerator::new(Ancestry::Common).unwrap();
    assert!(common.is_valid_name("William"));
    assert!(!common.is_valid_name("Qwxj Smith"));
}

#[test]
fn half_orc_names() {
    let half_orc = NameGenerator::new("orcish".parse().unwrap()).unwrap();
    assert_eq!(half_orc.ancestry(), Ancestry::HalfOrc);
    for name in ["Danta Kosht", "Bartok Brescht"] {
        assert!(half_orc.is_valid_name(name), "{name}");
    }
    for name in ["Ara am Akiir", "Zandilar"] {
        assert!(!half_orc.is_valid_name(name), "{name}");
    }

    let orcish = tongues::orcish().unwrap();
    assert!(orcish.is_valid_word("Kosht"));
    assert!(!orcish.is_valid_word("Zandilar"));
}

#[test]
fn every_tongue_names_its_people() {
    let mut rng = StdRng::seed_from_u64(4839);
    for ancestry in Ancestry::ALL {
        let generator = NameGenerator::new(ancestry).unwrap();
        let name = generator.generate(&mut rng).unwrap();
        assert!(generator.is_valid_name(&name.to_string()), "{ancestry}: {name}");
    }
}
