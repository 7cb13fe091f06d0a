/// The built-in tongues of Telisar.
use super::grammar::{Grapheme, Language, LanguageDef, LanguageError};

const COMMON_VOWELS: &[&str] = &["a", "e", "i", "o", "u"];

const COMMON_CONSONANTS: &[&str] = &[
    "b", "bs", "ct", "ch", "ck", "d", "dd", "f", "ff", "g", "gh", "gs", "h", "k", "l", "m", "ms",
    "n", "ns", "p", "ps", "r", "rb", "rd", "rf", "rk", "rl", "rm", "rn", "rp", "rs", "rt", "ry",
    "s", "sh", "sk", "ss", "st", "sy", "t", "th", "tk", "ts", "tt", "ty", "v", "w", "ws", "x", "y",
    "yd", "yk", "yl", "ym", "yn", "yp", "yr", "ys", "yt", "yz", "z", "cd",
];

const ELVEN_VOWELS: &[&str] = &["a", "e", "i", "o", "u", "y"];

const ELVEN_CONSONANTS: &[&str] = &[
    "b", "c", "d", "f", "g", "h", "k", "l", "m", "n", "p", "q", "r", "s", "t", "v", "w", "z",
    "th",
];

/// No more than three consonants or two vowels in a row.
const ELVEN_FORBIDDEN: &str = "[^aeiouy]{4}|[aeiouy]{3}";

const DWARVISH_VOWELS: &[&str] = &["a", "e", "i", "o", "u", "î", "ê", "â", "û", "ô"];

const DWARVISH_CONSONANTS: &[&str] = &[
    "b", "p", "ph", "d", "t", "th", "j", "c", "ch", "g", "k", "kh", "v", "f", "z", "s", "zh", "sh",
    "hy", "h", "r", "l", "y", "w", "m", "n",
];

const ORCISH_VOWELS: &[&str] = &["a", "e", "i", "o", "u"];

const ORCISH_CONSONANTS: &[&str] = &[
    "b", "c", "ch", "cht", "d", "f", "h", "k", "m", "n", "p", "r", "s", "sh", "sht", "t", "x", "z",
];

/// The hard consonant pairs every orcish word carries somewhere.
const ORCISH_CLUSTERS: &str =
    "b[dkprs]|c[hkprst]|d[bks]|f[ckrt]|k[rsz]|ms|n[stz]|p[st]|r[ktz]|s[chkrt]|t[chrsz]";

const ORCISH_FORBIDDEN: &str = "[aeiou]{3}|[^aeiou]{5}";

const HALFLING_VOWELS: &[&str] = &["a'", "e'", "i'", "o'", "a", "e", "i", "o", "y"];

const HALFLING_CONSONANTS: &[&str] = &[
    "b", "d", "f", "g", "h", "j", "l", "m", "n", "p", "r", "s", "t", "v", "w", "z",
];

const GNOMISH_VOWELS: &[&str] = &["a", "e", "i", "o", "u", "y"];

const GNOMISH_CONSONANTS: &[&str] = HALFLING_CONSONANTS;

/// Halfling and gnomish words end on an open vowel.
const OPEN_ENDING: &str = "[aeioy]$";

const INFERNAL_VOWELS: &[&str] = &["a", "e", "i", "o", "u"];

const INFERNAL_CONSONANTS: &[&str] = &[
    "b", "c", "d", "f", "g", "j", "k", "l", "m", "n", "p", "r", "s", "t", "v", "x", "y", "z",
    "t'h", "t'j", "t'z", "x't", "x'z", "x'j",
];

const INFERNAL_FORBIDDEN: &str = "[aeiou]{3}|[bcdfghjklmnprstvxyz']{4}";

/// Shared by Abyssal and Celestial. `u̇` is a `u` with a combining dot.
const EXALTED_VOWELS: &[&str] = &[
    "a", "e", "i", "o", "u", "î", "ê", "â", "û", "ô", "ä", "ö", "ü", "äu", "ȧ", "ė", "ị", "ȯ",
    "u\u{307}",
];

const ABYSSAL_CONSONANTS: &[&str] = &["c", "g", "j", "k", "p", "ss", "t"];

const ABYSSAL_FORBIDDEN: &str = r"[aeiouîêâûôäöüȧėịȯ\x{307}]{5}|[cgjkpst]{3}";

const CELESTIAL_CONSONANTS: &[&str] = &["b", "sc", "f", "h", "l", "m", "n", "r", "s", "v"];

const CELESTIAL_FORBIDDEN: &str = r"[aeiouîêâûôäöüȧėịȯ\x{307}]{5}|[bcfhlmnrsv]{3}";

const UNDERCOMMON_CONSONANTS: &[&str] = &[
    "b", "c", "d", "f", "g", "h", "k", "l", "m", "n", "p", "r", "s", "t", "v", "w", "y", "z",
];

const UNDERCOMMON_FORBIDDEN: &str = "[aeiouäöü]{3}|[bcdfghklmnprstvwyz]{4}";

const DRACONIC_VOWELS: &[&str] = &[
    "a'", "aa", "ah", "e'", "ee", "ei", "ey", "i'", "ii", "ir", "o'", "u'", "uu",
];

const DRACONIC_CONSONANTS: &[&str] = &[
    "d", "f", "g", "h", "j", "k", "l", "n", "r", "s", "t", "v", "x", "y", "z",
];

const DRACONIC_FORBIDDEN: &str = "[aeiou']{3}|[dfghjklnrstvxyz]{4}";

/// Dragons' true names never double a vowel or a consonant.
const DRAGON_FORBIDDEN: &str = "[aeiou]{2}|[dfghjklnrstvxyz]{2}";

fn tongue(
    name: &str,
    vowels: Vec<Grapheme>,
    consonants: &[&str],
    template: &str,
    weights: &[u32],
    minimum_length: usize,
) -> LanguageDef {
    LanguageDef {
        name: name.to_string(),
        vowels,
        consonants: Grapheme::even(consonants),
        affixes: Vec::new(),
        syllable_template: template.to_string(),
        syllable_weights: weights.to_vec(),
        pattern: None,
        forbidden: None,
        minimum_length,
    }
}

fn with_rules(mut def: LanguageDef, pattern: Option<&str>, forbidden: Option<&str>) -> LanguageDef {
    def.pattern = pattern.map(str::to_string);
    def.forbidden = forbidden.map(str::to_string);
    def
}

/// The trade tongue: short consonant-vowel syllables.
pub fn common() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(COMMON_VOWELS);
    let def = tongue("Common", vowels, COMMON_CONSONANTS, "CV", &[1, 6, 4], 2);
    Language::from_def(def)
}

fn elven_def(name: &str, template: &str, weights: &[u32]) -> LanguageDef {
    let vowels = Grapheme::even(ELVEN_VOWELS);
    let def = tongue(name, vowels, ELVEN_CONSONANTS, template, weights, 2);
    with_rules(def, None, Some(ELVEN_FORBIDDEN))
}

pub fn elven() -> Result<Language, LanguageError> {
    Language::from_def(elven_def("Elven", "cVc", &[1, 2, 1]))
}

/// Elven given names: always two or three syllables.
pub fn elven_person() -> Result<Language, LanguageError> {
    Language::from_def(elven_def("Elven person", "cVCv", &[0, 2, 2]))
}

pub fn elven_place() -> Result<Language, LanguageError> {
    Language::from_def(elven_def("Elven place", "cVvc", &[1, 2]))
}

pub fn dwarvish() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(DWARVISH_VOWELS);
    let def = tongue("Dwarvish", vowels, DWARVISH_CONSONANTS, "CVc", &[4, 1], 2);
    Language::from_def(def)
}

pub fn orcish() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(ORCISH_VOWELS);
    let def = tongue("Orcish", vowels, ORCISH_CONSONANTS, "CcV", &[4, 8, 1], 2);
    Language::from_def(with_rules(def, Some(ORCISH_CLUSTERS), Some(ORCISH_FORBIDDEN)))
}

/// Half-orc names open on a stop and close their syllables hard.
pub fn half_orc_person() -> Result<Language, LanguageError> {
    let stop_first = format!(
        "^(?:b[dkprs]|c[hkprst]|d[bks]|k[rsz]|p[st]|t[chrsz]|[bcdkptxz].*(?:{}))",
        ORCISH_CLUSTERS
    );
    let vowels = Grapheme::even(ORCISH_VOWELS);
    let def = tongue("Half-orc person", vowels, ORCISH_CONSONANTS, "CVcc", &[4, 8, 1], 2);
    Language::from_def(with_rules(def, Some(&stop_first), Some(ORCISH_FORBIDDEN)))
}

/// Long, soft words of two to six syllables.
pub fn halfling() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(HALFLING_VOWELS);
    let weights = [0, 1, 2, 3, 2, 1];
    let def = tongue("Halfling", vowels, HALFLING_CONSONANTS, "cV", &weights, 1);
    Language::from_def(with_rules(def, Some(OPEN_ENDING), None))
}

pub fn gnomish() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(GNOMISH_VOWELS);
    let def = tongue("Gnomish", vowels, GNOMISH_CONSONANTS, "CVv", &[3, 1], 1);
    Language::from_def(with_rules(def, Some(OPEN_ENDING), None))
}

pub fn infernal() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(INFERNAL_VOWELS);
    let def = tongue("Infernal", vowels, INFERNAL_CONSONANTS, "CV", &[3, 2], 1);
    Language::from_def(with_rules(def, None, Some(INFERNAL_FORBIDDEN)))
}

pub fn abyssal() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(EXALTED_VOWELS);
    let def = tongue("Abyssal", vowels, ABYSSAL_CONSONANTS, "Vvcv", &[3, 2], 2);
    Language::from_def(with_rules(def, None, Some(ABYSSAL_FORBIDDEN)))
}

pub fn celestial() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(EXALTED_VOWELS);
    let def = tongue("Celestial", vowels, CELESTIAL_CONSONANTS, "Vvccvv", &[3, 2], 5);
    Language::from_def(with_rules(def, None, Some(CELESTIAL_FORBIDDEN)))
}

/// Plain vowels are twice as common as the umlauted ones.
fn undercommon_vowels() -> Vec<Grapheme> {
    let mut vowels: Vec<Grapheme> = ["a", "e", "i", "o", "u"]
        .into_iter()
        .map(|v| Grapheme::new(v, 2))
        .collect();
    vowels.extend(Grapheme::even(&["ä", "ö", "ü", "äu"]));
    vowels
}

fn undercommon_def(
    name: &str,
    template: &str,
    weights: &[u32],
    minimum_length: usize,
) -> LanguageDef {
    let vowels = undercommon_vowels();
    let def = tongue(name, vowels, UNDERCOMMON_CONSONANTS, template, weights, minimum_length);
    with_rules(def, None, Some(UNDERCOMMON_FORBIDDEN))
}

pub fn undercommon() -> Result<Language, LanguageError> {
    Language::from_def(undercommon_def("Undercommon", "cvcVCv", &[1, 1], 4))
}

pub fn drow_person() -> Result<Language, LanguageError> {
    Language::from_def(undercommon_def("Drow person", "cVCv", &[1, 2], 4))
}

/// The stem of a drow house name; the house ending is added by the namer.
pub fn drow_surname() -> Result<Language, LanguageError> {
    Language::from_def(undercommon_def("Drow surname", "vCv", &[1, 2, 2], 2))
}

pub fn draconic() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(DRACONIC_VOWELS);
    let weights = [0, 0, 1, 2, 2, 1];
    let def = tongue("Draconic", vowels, DRACONIC_CONSONANTS, "CV", &weights, 3);
    Language::from_def(with_rules(def, None, Some(DRACONIC_FORBIDDEN)))
}

/// The stem of a dragon's name; the namer adds the hissing ending.
pub fn dragon() -> Result<Language, LanguageError> {
    let vowels = Grapheme::even(ORCISH_VOWELS);
    let def = tongue("Dragon", vowels, DRACONIC_CONSONANTS, "vCV", &[0, 1, 2], 2);
    Language::from_def(with_rules(def, None, Some(DRAGON_FORBIDDEN)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn all() -> Vec<Language> {
        [
            common(),
            elven(),
            elven_person(),
            elven_place(),
            dwarvish(),
            orcish(),
            half_orc_person(),
            halfling(),
            gnomish(),
            infernal(),
            abyssal(),
            celestial(),
            undercommon(),
            drow_person(),
            drow_surname(),
            draconic(),
            dragon(),
        ]
        .into_iter()
        .map(|language| language.unwrap())
        .collect()
    }

    #[test]
    fn builtin_tongues_build() {
        assert_eq!(all().len(), 17);
    }

    #[test]
    fn common_names() {
        let common = common().unwrap();
        for name in ["Banu", "Tak", "William", "Kris", "Randal", "Belia", "Met", "Adi", "Migas"] {
            assert!(common.is_valid_word(name), "{name}");
        }
        assert!(!common.is_valid_word("a"));
    }

    #[test]
    fn elven_words() {
        let elven = elven().unwrap();
        for word in ["Ara", "am", "Akiir", "Elstuvian", "Vakarilithien"] {
            assert!(elven.is_valid_word(word), "{word}");
        }
        assert!(!elven.is_valid_word("aeia"));
        assert!(!elven.is_valid_word("arstki"));
    }

    #[test]
    fn dwarvish_words() {
        let dwarvish = dwarvish().unwrap();
        assert!(dwarvish.is_valid_word("Moradin"));
        assert!(dwarvish.is_valid_word("Dûrin"));
        assert!(!dwarvish.is_valid_word("Quill"));
    }

    #[test]
    fn orcish_words_need_a_hard_cluster() {
        let orcish = orcish().unwrap();
        for word in ["Kosht", "Danta", "Bartok", "Brescht", "Mastrak"] {
            assert!(orcish.is_valid_word(word), "{word}");
        }
        assert!(!orcish.is_valid_word("Kaka"));
        assert!(!orcish.is_valid_word("Zandilar"));

        let half_orc = half_orc_person().unwrap();
        assert!(half_orc.is_valid_word("Kosht"));
        assert!(half_orc.is_valid_word("Chta"));
        assert!(!half_orc.is_valid_word("Mastrak"));
        assert!(!half_orc.is_valid_word("Sharkt"));
    }

    #[test]
    fn open_endings() {
        let halfling = halfling().unwrap();
        assert!(halfling.is_valid_word("Milo"));
        assert!(halfling.is_valid_word("Ro'sie"));
        assert!(!halfling.is_valid_word("Milon"));

        let gnomish = gnomish().unwrap();
        assert!(gnomish.is_valid_word("Bimpo"));
        assert!(!gnomish.is_valid_word("Bimpu"));
    }

    #[test]
    fn infernal_and_exalted_runs() {
        let infernal = infernal().unwrap();
        assert!(infernal.is_valid_word("T'hazi"));
        assert!(!infernal.is_valid_word("kaaai"));

        let celestial = celestial().unwrap();
        assert!(celestial.is_valid_word("Ämaleî"));
        assert!(!celestial.is_valid_word("Äma"));
        assert!(!celestial.is_valid_word("ascsaa"));

        let abyssal = abyssal().unwrap();
        assert!(abyssal.is_valid_word("Ukoti"));
        assert!(!abyssal.is_valid_word("uktpa"));
    }

    #[test]
    fn undercommon_and_draconic() {
        let drow = drow_person().unwrap();
        assert!(drow.is_valid_word("Zaknafein"));
        assert!(!drow.is_valid_word("Zak"));

        let draconic = draconic().unwrap();
        assert!(draconic.is_valid_word("Da'kee"));
        assert!(!draconic.is_valid_word("Da"));

        let dragon = dragon().unwrap();
        assert!(dragon.is_valid_word("Kal"));
        assert!(!dragon.is_valid_word("Kaal"));
    }

    #[test]
    fn generated_words_are_valid() {
        let mut rng = StdRng::seed_from_u64(2024);
        for language in all() {
            let words: Vec<String> = language.words(&mut rng).take(25).collect();
            assert_eq!(words.len(), 25, "{}", language.name());
            assert!(words.iter().all(|w| language.is_valid_word(w)));
        }
    }
}
