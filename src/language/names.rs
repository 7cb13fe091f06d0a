/// Person-name generators for the peoples of Telisar.
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use super::grammar::{Language, LanguageError};
use super::tongues;

/// Endings of Common family names.
pub const COMMON_SURNAME_SUFFIXES: &[&str] = &[
    "berg", "borg", "borough", "bury", "berry", "by", "ford", "gard", "grave", "grove", "gren",
    "hardt", "hart", "heim", "holm", "land", "leigh", "ley", "ly", "lof", "love", "lund", "man",
    "mark", "ness", "olf", "olph", "quist", "rop", "rup", "stad", "stead", "stein", "strom", "thal",
    "thorpe", "ton", "vall", "wich", "win", "some", "smith", "bridge", "cope", "town", "er", "don",
    "den", "dell", "son",
];

/// Joins an elven given name to the place the elf hails from.
pub const ELVEN_CONNECTIVES: &[&str] = &["am", "an", "al", "um"];

/// Endings of dwarvish father-names.
pub const DWARVISH_SUFFIXES: &[&str] = &["son", "sson", "zhon", "dottir", "dothir", "dottyr"];

/// Every halfling is known as "the" something.
pub const HALFLING_NICKNAMES: &[&str] = &[
    "able", "clean", "enthusiastic", "heartening", "meek", "reasonable", "talented",
    "accommodating", "clever", "ethical", "helpful", "meritorious", "refined", "temperate",
    "accomplished", "commendable", "excellent", "moral", "reliable", "terrific", "adept",
    "compassionate", "exceptional", "honest", "neat", "remarkable", "tidy", "admirable", "composed",
    "exemplary", "honorable", "noble", "resilient", "quality", "agreeable", "considerate",
    "exquisite", "hopeful", "obliging", "respectable", "tremendous", "amazing", "consummate",
    "extraordinary", "humble", "observant", "respectful", "trustworthy", "appealing",
    "cooperative", "fabulous", "important", "optimistic", "resplendent", "trusty", "astute",
    "correct", "faithful", "impressive", "organized", "responsible", "truthful", "attractive",
    "courageous", "fantastic", "incisive", "outstanding", "robust", "unbeatable", "awesome",
    "courteous", "fascinating", "incredible", "peaceful", "selfless", "understanding", "beautiful",
    "dazzling", "fine", "innocent", "perceptive", "sensational", "unequaled", "benevolent",
    "decent", "classy", "insightful", "perfect", "sensible", "unparalleled", "brave", "delightful",
    "fortitudinous", "inspiring", "pleasant", "serene", "upbeat", "breathtaking", "dependable",
    "gallant", "intelligent", "pleasing", "sharp", "valiant", "bright", "devoted", "generous",
    "joyful", "polite", "shining", "valuable", "brilliant", "diplomatic", "gentle", "judicious",
    "positive", "shrewd", "vigilant", "bubbly", "discerning", "gifted", "just", "praiseworthy",
    "smart", "vigorous", "buoyant", "disciplined", "giving", "kindly", "precious", "sparkling",
    "virtuous", "calm", "elegant", "gleaming", "laudable", "priceless", "spectacular",
    "well mannered", "capable", "elevating", "glowing", "likable", "principled", "splendid",
    "wholesome", "charitable", "enchanting", "good", "lovable", "prompt", "steadfast", "wise",
    "charming", "encouraging", "gorgeous", "lovely", "prudent", "stunning", "witty", "chaste",
    "endearing", "graceful", "loyal", "punctual", "super", "wonderful", "cheerful", "energetic",
    "gracious", "luminous", "pure", "superb", "worthy", "chivalrous", "engaging", "great",
    "magnanimous", "quick", "superior", "zesty", "enhanced", "happy", "magnificent", "radiant",
    "supportive", "civil", "enjoyable", "hardy", "marvelous", "rational", "supreme",
];

/// Endings that turn an infernal root into a tiefling name.
pub const TIEFLING_SUFFIXES: &[&str] = &["us", "ius", "to", "tro", "eus", "a", "an", "is"];

/// Virtue names some tieflings take.
pub const TIEFLING_NICKNAMES: &[&str] = &[
    "eternal", "wondrous", "luminous", "perfect", "essential", "golden", "unfailing", "perpetual",
    "infinite", "exquisite", "sinless", "ultimate", "flawless", "timeless", "glorious", "absolute",
    "boundless", "true", "incredible", "virtuous", "supreme", "enchanted", "magnificent",
    "superior", "spectacular", "divine",
];

// A drow house name ends in vowel, consonant, link and final.
const DROW_HOUSE_VOWELS: &[&str] = &["a", "i", "e"];
const DROW_HOUSE_CONSONANTS: &[&str] = &["t", "s", "m", "n", "l", "r", "d", "th", "ss"];
const DROW_HOUSE_LINKS: &[&str] = &["ie", "ia", "io"];
const DROW_HOUSE_FINALS: &[&str] = &["th", "s", "r", "n"];

// A dragon's name ends in vowel, hiss and tail.
const DRAGON_VOWELS: &[&str] = &["a", "e", "i", "o", "u"];
const DRAGON_HISSES: &[&str] = &["th", "x", "ss", "z"];
const DRAGON_TAILS: &[&str] = &["us", "ux", "as", "ax", "is", "ix", "es", "ex"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ancestry {
    Common,
    Elven,
    Dwarvish,
    HalfOrc,
    Halfling,
    Gnomish,
    Drow,
    Tiefling,
    Dragon,
}

impl Ancestry {
    pub const ALL: [Ancestry; 9] = [
        Ancestry::Common,
        Ancestry::Elven,
        Ancestry::Dwarvish,
        Ancestry::HalfOrc,
        Ancestry::Halfling,
        Ancestry::Gnomish,
        Ancestry::Drow,
        Ancestry::Tiefling,
        Ancestry::Dragon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Ancestry::Common => "common",
            Ancestry::Elven => "elven",
            Ancestry::Dwarvish => "dwarvish",
            Ancestry::HalfOrc => "half-orc",
            Ancestry::Halfling => "halfling",
            Ancestry::Gnomish => "gnomish",
            Ancestry::Drow => "drow",
            Ancestry::Tiefling => "tiefling",
            Ancestry::Dragon => "dragon",
        }
    }
}

impl fmt::Display for Ancestry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ancestry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "common" | "human" => Ok(Ancestry::Common),
            "elven" | "elf" => Ok(Ancestry::Elven),
            "dwarvish" | "dwarf" => Ok(Ancestry::Dwarvish),
            "half-orc" | "halforc" | "orcish" | "orc" => Ok(Ancestry::HalfOrc),
            "halfling" => Ok(Ancestry::Halfling),
            "gnomish" | "gnome" => Ok(Ancestry::Gnomish),
            "drow" | "undercommon" => Ok(Ancestry::Drow),
            "tiefling" | "infernal" => Ok(Ancestry::Tiefling),
            "dragon" | "draconic" => Ok(Ancestry::Dragon),
            other => {
                let known: Vec<&str> = Ancestry::ALL.iter().map(|a| a.name()).collect();
                Err(format!(
                    "unknown ancestry '{}' (expected one of {})",
                    other,
                    known.join(", ")
                ))
            }
        }
    }
}

/// A generated name, capitalised and ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub given: String,
    /// Family name, father-name, house, or "am Place" for elves.
    pub surname: Option<String>,
    /// "the Brave" and the like.
    pub nickname: Option<String>,
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.given)?;
        for part in self.surname.iter().chain(&self.nickname) {
            write!(f, " {}", part)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Scheme {
    /// Given name and a family name ending in one of `suffixes`.
    Suffixed {
        language: Language,
        suffixes: &'static [&'static str],
    },
    Elven {
        person: Language,
        place: Language,
    },
    /// Given and family name from one tongue, and a nickname when the
    /// table has any.
    Paired {
        language: Language,
        nicknames: &'static [&'static str],
    },
    Drow {
        person: Language,
        house: Language,
        ending: Regex,
    },
    Tiefling(Language),
    Dragon {
        language: Language,
        ending: Regex,
    },
}

/// Generates names for one ancestry.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    ancestry: Ancestry,
    scheme: Scheme,
}

impl NameGenerator {
    pub fn new(ancestry: Ancestry) -> Result<NameGenerator, LanguageError> {
        let scheme = match ancestry {
            Ancestry::Common => Scheme::Suffixed {
                language: tongues::common()?,
                suffixes: COMMON_SURNAME_SUFFIXES,
            },
            Ancestry::Elven => Scheme::Elven {
                person: tongues::elven_person()?,
                place: tongues::elven_place()?,
            },
            Ancestry::Dwarvish => Scheme::Suffixed {
                language: tongues::dwarvish()?,
                suffixes: DWARVISH_SUFFIXES,
            },
            Ancestry::HalfOrc => Scheme::Paired {
                language: tongues::half_orc_person()?,
                nicknames: &[],
            },
            Ancestry::Halfling => Scheme::Paired {
                language: tongues::halfling()?,
                nicknames: HALFLING_NICKNAMES,
            },
            Ancestry::Gnomish => Scheme::Paired {
                language: tongues::gnomish()?,
                nicknames: &[],
            },
            Ancestry::Drow => Scheme::Drow {
                person: tongues::drow_person()?,
                house: tongues::drow_surname()?,
                ending: ending_pattern(&[
                    DROW_HOUSE_VOWELS,
                    DROW_HOUSE_CONSONANTS,
                    DROW_HOUSE_LINKS,
                    DROW_HOUSE_FINALS,
                ])?,
            },
            Ancestry::Tiefling => Scheme::Tiefling(tongues::infernal()?),
            Ancestry::Dragon => Scheme::Dragon {
                language: tongues::dragon()?,
                ending: ending_pattern(&[DRAGON_VOWELS, DRAGON_HISSES, DRAGON_TAILS])?,
            },
        };
        Ok(NameGenerator { ancestry, scheme })
    }

    pub fn ancestry(&self) -> Ancestry {
        self.ancestry
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PersonName, LanguageError> {
        let name = match &self.scheme {
            Scheme::Suffixed { language, suffixes } => {
                let given = language.word(rng)?;
                let family = format!("{}{}", language.word(rng)?, pick(suffixes, rng));
                PersonName {
                    given: capitalize(&given),
                    surname: Some(capitalize(&family)),
                    nickname: None,
                }
            }
            Scheme::Elven { person, place } => PersonName {
                given: capitalize(&person.word(rng)?),
                surname: Some(format!(
                    "{} {}",
                    pick(ELVEN_CONNECTIVES, rng),
                    capitalize(&place.word(rng)?)
                )),
                nickname: None,
            },
            Scheme::Paired {
                language,
                nicknames,
            } => PersonName {
                given: capitalize(&language.word(rng)?),
                surname: Some(capitalize(&language.word(rng)?)),
                nickname: (!nicknames.is_empty()).then(|| nickname(pick(nicknames, rng))),
            },
            Scheme::Drow { person, house, .. } => {
                let mut family = house.word(rng)?;
                for part in [
                    DROW_HOUSE_VOWELS,
                    DROW_HOUSE_CONSONANTS,
                    DROW_HOUSE_LINKS,
                    DROW_HOUSE_FINALS,
                ] {
                    family.push_str(pick(part, rng));
                }
                PersonName {
                    given: capitalize(&person.word(rng)?),
                    surname: Some(capitalize(&family)),
                    nickname: None,
                }
            }
            Scheme::Tiefling(infernal) => {
                let given = format!("{}{}", infernal.word(rng)?, pick(TIEFLING_SUFFIXES, rng));
                // Roughly a third of tieflings take a virtue name.
                let nickname = rng
                    .gen_ratio(1, 3)
                    .then(|| nickname(pick(TIEFLING_NICKNAMES, rng)));
                PersonName {
                    given: capitalize(&given),
                    surname: None,
                    nickname,
                }
            }
            Scheme::Dragon { language, .. } => {
                let mut given = language.word(rng)?;
                for part in [DRAGON_VOWELS, DRAGON_HISSES, DRAGON_TAILS] {
                    given.push_str(pick(part, rng));
                }
                PersonName {
                    given: capitalize(&given),
                    surname: None,
                    nickname: None,
                }
            }
        };
        tracing::debug!(ancestry = %self.ancestry, name = %name, "generated name");
        Ok(name)
    }

    /// An endless stream of names, ending early only if a word cannot be
    /// found within the attempt budget.
    pub fn names<'a, R: Rng + ?Sized>(&'a self, rng: &'a mut R) -> Names<'a, R> {
        Names {
            generator: self,
            rng,
            exhausted: false,
        }
    }

    /// Whether an existing name fits this ancestry's naming rules. A lone
    /// given name is accepted.
    pub fn is_valid_name(&self, name: &str) -> bool {
        let words: Vec<&str> = name.split_whitespace().collect();
        let nicknames = self.nicknames();
        let the = words.iter().position(|word| word.eq_ignore_ascii_case("the"));
        let names = match the {
            Some(at) if !nicknames.is_empty() => {
                let nickname = words[at + 1..].join(" ").to_lowercase();
                if !nicknames.contains(&nickname.as_str()) {
                    return false;
                }
                &words[..at]
            }
            _ => words.as_slice(),
        };

        match (&self.scheme, names) {
            (_, []) => false,
            (Scheme::Suffixed { language, .. }, [given]) => language.is_valid_word(given),
            (Scheme::Suffixed { language, suffixes }, [given, family]) => {
                language.is_valid_word(given) && is_valid_with_suffix(language, family, suffixes)
            }
            (Scheme::Elven { person, .. }, [given]) => person.is_valid_word(given),
            (Scheme::Elven { person, place }, [given, connective, home]) => {
                person.is_valid_word(given)
                    && ELVEN_CONNECTIVES.contains(&connective.to_lowercase().as_str())
                    && place.is_valid_word(home)
            }
            (Scheme::Paired { language, .. }, [given]) => language.is_valid_word(given),
            (Scheme::Paired { language, .. }, [given, family]) => {
                language.is_valid_word(given) && language.is_valid_word(family)
            }
            (Scheme::Drow { person, .. }, [given]) => person.is_valid_word(given),
            (Scheme::Drow { person, house, ending }, [given, family]) => {
                person.is_valid_word(given) && has_ending(house, family, ending)
            }
            (Scheme::Tiefling(infernal), [given]) => {
                has_suffix(infernal, given, TIEFLING_SUFFIXES)
            }
            (Scheme::Dragon { language, ending }, [given]) => has_ending(language, given, ending),
            _ => false,
        }
    }

    fn nicknames(&self) -> &'static [&'static str] {
        match &self.scheme {
            Scheme::Paired { nicknames, .. } => *nicknames,
            Scheme::Tiefling(_) => TIEFLING_NICKNAMES,
            _ => &[],
        }
    }
}

/// Lazy sequence of names returned by [`NameGenerator::names`].
pub struct Names<'a, R: Rng + ?Sized> {
    generator: &'a NameGenerator,
    rng: &'a mut R,
    exhausted: bool,
}

impl<R: Rng + ?Sized> Iterator for Names<'_, R> {
    type Item = PersonName;

    fn next(&mut self) -> Option<PersonName> {
        if self.exhausted {
            return None;
        }
        match self.generator.generate(self.rng) {
            Ok(name) => Some(name),
            Err(e) => {
                let ancestry = self.generator.ancestry;
                tracing::warn!(%ancestry, error = %e, "name stream ended");
                self.exhausted = true;
                None
            }
        }
    }
}

/// Matches a whole ending built from one choice out of each table in turn.
fn ending_pattern(parts: &[&[&str]]) -> Result<Regex, LanguageError> {
    let groups: Vec<String> = parts
        .iter()
        .map(|choices| format!("(?:{})", choices.join("|")))
        .collect();
    Ok(Regex::new(&format!("^{}$", groups.concat()))?)
}

/// Some split of `word` is a valid stem in `language` followed by a
/// whole `ending`.
fn has_ending(language: &Language, word: &str, ending: &Regex) -> bool {
    let lower = word.to_lowercase();
    lower
        .char_indices()
        .skip(1)
        .any(|(at, _)| ending.is_match(&lower[at..]) && language.is_valid_word(&lower[..at]))
}

/// Some suffix in `suffixes` ends `word` and leaves a valid stem.
fn has_suffix(language: &Language, word: &str, suffixes: &[&str]) -> bool {
    let lower = word.to_lowercase();
    suffixes.iter().any(|suffix| {
        lower.len() > suffix.len()
            && lower.ends_with(suffix)
            && language.is_valid_word(&lower[..lower.len() - suffix.len()])
    })
}

/// A word that may carry one of `suffixes`; a word that is all suffix, or
/// has none, is checked whole.
fn is_valid_with_suffix(language: &Language, word: &str, suffixes: &[&str]) -> bool {
    has_suffix(language, word, suffixes) || language.is_valid_word(word)
}

fn pick<'a, R: Rng + ?Sized>(choices: &[&'a str], rng: &mut R) -> &'a str {
    choices.choose(rng).copied().unwrap_or_default()
}

fn nickname(text: &str) -> String {
    let words: Vec<String> = text.split_whitespace().map(capitalize).collect();
    format!("the {}", words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ancestry_from_str() {
        assert_eq!("Dwarf".parse::<Ancestry>().unwrap(), Ancestry::Dwarvish);
        assert_eq!("elven".parse::<Ancestry>().unwrap(), Ancestry::Elven);
        assert_eq!("orcish".parse::<Ancestry>().unwrap(), Ancestry::HalfOrc);
        assert_eq!("Half-Orc".parse::<Ancestry>().unwrap(), Ancestry::HalfOrc);
        assert_eq!("gnome".parse::<Ancestry>().unwrap(), Ancestry::Gnomish);
        assert!("goblin".parse::<Ancestry>().is_err());
        for ancestry in Ancestry::ALL {
            assert_eq!(ancestry.name().parse::<Ancestry>().unwrap(), ancestry);
        }
    }

    #[test]
    fn capitalize_words() {
        assert_eq!(capitalize("moradin"), "Moradin");
        assert_eq!(capitalize("ûlfar"), "Ûlfar");
        assert_eq!(capitalize(""), "");
        assert_eq!(nickname("well mannered"), "the Well Mannered");
    }

    #[test]
    fn display_joins_present_parts() {
        let name = PersonName {
            given: "Kabazis".to_string(),
            surname: None,
            nickname: Some("the Eternal".to_string()),
        };
        assert_eq!(name.to_string(), "Kabazis the Eternal");
    }

    #[test]
    fn existing_dwarvish_names() {
        let generator = NameGenerator::new(Ancestry::Dwarvish).unwrap();
        for name in ["Moradin", "Ultar Ultarsson", "Julia Ultarsson"] {
            assert!(generator.is_valid_name(name), "{name}");
        }
        assert!(!generator.is_valid_name("Ultar Ultar Ultarsson"));
    }

    #[test]
    fn existing_elven_names() {
        let generator = NameGenerator::new(Ancestry::Elven).unwrap();
        assert!(generator.is_valid_name("Ara am Akiir"));
        assert!(generator.is_valid_name("Elstuvian am Vakarilithien"));
        assert!(!generator.is_valid_name("Ara of Akiir"));
    }

    #[test]
    fn common_surnames() {
        let generator = NameGenerator::new(Ancestry::Common).unwrap();
        assert!(generator.is_valid_name("Randal Migasford"));
        assert!(generator.is_valid_name("Belia Smith"));
    }

    #[test]
    fn existing_half_orc_names() {
        let generator = NameGenerator::new(Ancestry::HalfOrc).unwrap();
        assert!(generator.is_valid_name("Danta Kosht"));
        assert!(generator.is_valid_name("Bartok Brescht"));
        assert!(!generator.is_valid_name("Zandilar"));
        assert!(!generator.is_valid_name("Ara am Akiir"));
    }

    #[test]
    fn nicknames_come_from_the_table() {
        let halfling = NameGenerator::new(Ancestry::Halfling).unwrap();
        assert!(halfling.is_valid_name("Milo Bero the Brave"));
        assert!(halfling.is_valid_name("Milo Bero the Well Mannered"));
        assert!(!halfling.is_valid_name("Milo Bero the Terrible"));

        let tiefling = NameGenerator::new(Ancestry::Tiefling).unwrap();
        assert!(tiefling.is_valid_name("Kabazis"));
        assert!(tiefling.is_valid_name("Kabazis the Eternal"));
        assert!(!tiefling.is_valid_name("Kabazis the Brave"));
        assert!(!tiefling.is_valid_name("Kabazq"));
    }

    #[test]
    fn composed_endings() {
        let drow = NameGenerator::new(Ancestry::Drow).unwrap();
        assert!(drow.is_valid_name("Zaknafein Vaslathiar"));
        assert!(!drow.is_valid_name("Zaknafein Vasl"));

        let dragon = NameGenerator::new(Ancestry::Dragon).unwrap();
        assert!(dragon.is_valid_name("Kalathux"));
        assert!(!dragon.is_valid_name("Kalath"));
        assert!(!dragon.is_valid_name("Kalathux Kalathux"));
    }

    #[test]
    fn generated_names_fit_their_ancestry() {
        let mut rng = StdRng::seed_from_u64(99);
        for ancestry in Ancestry::ALL {
            let generator = NameGenerator::new(ancestry).unwrap();
            let names: Vec<PersonName> = generator.names(&mut rng).take(20).collect();
            assert_eq!(names.len(), 20, "{ancestry}");
            for name in &names {
                assert!(name.given.chars().next().unwrap().is_uppercase(), "{name}");
                assert!(generator.is_valid_name(&name.to_string()), "{ancestry}: {name}");
            }
        }
    }

    #[test]
    fn generated_names_have_ancestry_shape() {
        let mut rng = StdRng::seed_from_u64(99);

        let elven = NameGenerator::new(Ancestry::Elven).unwrap();
        for name in elven.names(&mut rng).take(20) {
            let surname = name.surname.unwrap();
            let connective = surname.split(' ').next().unwrap();
            assert!(ELVEN_CONNECTIVES.contains(&connective), "{surname}");
        }

        let dwarvish = NameGenerator::new(Ancestry::Dwarvish).unwrap();
        for name in dwarvish.names(&mut rng).take(20) {
            let surname = name.surname.unwrap();
            assert!(DWARVISH_SUFFIXES.iter().any(|s| surname.ends_with(s)), "{surname}");
        }

        let halfling = NameGenerator::new(Ancestry::Halfling).unwrap();
        for name in halfling.names(&mut rng).take(20) {
            assert!(name.nickname.unwrap().starts_with("the "));
        }

        let dragon = NameGenerator::new(Ancestry::Dragon).unwrap();
        for name in dragon.names(&mut rng).take(20) {
            assert!(name.surname.is_none() && name.nickname.is_none());
            assert!(DRAGON_TAILS.iter().any(|t| name.given.ends_with(t)), "{}", name.given);
        }
    }
}
