/// Syllable grammar runtime: phoneme inventories, templates, validation,
/// and word generation.
///
/// A word is built from one or more syllables. Each syllable follows a
/// template of phoneme indicators:
///
/// - `c` / `C` an optional / required consonant
/// - `v` / `V` an optional / required vowel
/// - `a` / `A` an optional / required affix
///
/// Optional parts are left out half of the time. The number of syllables
/// is drawn from relative weights: `[2, 2, 1]` allows one, two or three
/// syllables with three half as likely, `[0, 1]` forces exactly two.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Attempts made to find a valid word before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("invalid syllable template '{template}': unknown phoneme indicator '{indicator}'")]
    InvalidTemplate { template: String, indicator: char },
    #[error("language '{language}' has no {kind} graphemes but its template requires them")]
    EmptyPhoneme { language: String, kind: PhonemeKind },
    #[error("invalid weights for {0}: at least one weight must be non-zero")]
    InvalidWeights(String),
    #[error("no valid {language} word found after {attempts} attempts")]
    Exhausted { language: String, attempts: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid validator pattern: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhonemeKind {
    Consonant,
    Vowel,
    Affix,
}

impl std::fmt::Display for PhonemeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PhonemeKind::Consonant => "consonant",
            PhonemeKind::Vowel => "vowel",
            PhonemeKind::Affix => "affix",
        };
        f.write_str(name)
    }
}

/// A written sound and its relative likelihood of being picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grapheme {
    pub text: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl Grapheme {
    pub fn new(text: &str, weight: u32) -> Self {
        Self {
            text: text.to_string(),
            weight,
        }
    }

    /// Equally weighted graphemes.
    pub fn even(texts: &[&str]) -> Vec<Grapheme> {
        texts.iter().map(|text| Grapheme::new(text, 1)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllablePart {
    pub kind: PhonemeKind,
    pub required: bool,
}

/// A parsed syllable template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableTemplate {
    pub parts: Vec<SyllablePart>,
}

impl SyllableTemplate {
    pub fn parse(template: &str) -> Result<SyllableTemplate, LanguageError> {
        let parts = template
            .chars()
            .map(|indicator| {
                let kind = match indicator.to_ascii_lowercase() {
                    'c' => PhonemeKind::Consonant,
                    'v' => PhonemeKind::Vowel,
                    'a' => PhonemeKind::Affix,
                    _ => {
                        return Err(LanguageError::InvalidTemplate {
                            template: template.to_string(),
                            indicator,
                        })
                    }
                };
                Ok(SyllablePart {
                    kind,
                    required: indicator.is_ascii_uppercase(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if parts.is_empty() {
            return Err(LanguageError::InvalidTemplate {
                template: template.to_string(),
                indicator: ' ',
            });
        }
        Ok(SyllableTemplate { parts })
    }

    pub fn uses(&self, kind: PhonemeKind) -> bool {
        self.parts.iter().any(|part| part.kind == kind)
    }
}

/// Rules a generated word must satisfy.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    /// The word must match this pattern somewhere.
    pub pattern: Option<Regex>,
    /// The word must not match this pattern anywhere.
    pub forbidden: Option<Regex>,
    pub minimum_length: usize,
}

impl Validator {
    pub fn new(minimum_length: usize) -> Self {
        Self {
            minimum_length,
            ..Self::default()
        }
    }

    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, LanguageError> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn with_forbidden(mut self, forbidden: &str) -> Result<Self, LanguageError> {
        self.forbidden = Some(Regex::new(forbidden)?);
        Ok(self)
    }

    pub fn check(&self, word: &str) -> bool {
        if word.chars().count() < self.minimum_length {
            return false;
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(word) {
                return false;
            }
        }
        if let Some(forbidden) = &self.forbidden {
            if forbidden.is_match(word) {
                return false;
            }
        }
        true
    }
}

/// A language as written in a RON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageDef {
    pub name: String,
    pub vowels: Vec<Grapheme>,
    pub consonants: Vec<Grapheme>,
    #[serde(default)]
    pub affixes: Vec<Grapheme>,
    pub syllable_template: String,
    pub syllable_weights: Vec<u32>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub forbidden: Option<String>,
    #[serde(default = "default_minimum_length")]
    pub minimum_length: usize,
}

fn default_minimum_length() -> usize {
    1
}

impl LanguageDef {
    pub fn load_from_ron(path: &Path) -> Result<LanguageDef, LanguageError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<LanguageDef, LanguageError> {
        Ok(ron::from_str(input)?)
    }
}

/// Graphemes of one phoneme kind with their sampling distribution.
#[derive(Debug, Clone)]
struct Inventory {
    graphemes: Vec<Grapheme>,
    distribution: Option<WeightedIndex<u32>>,
}

impl Inventory {
    fn new(kind: PhonemeKind, graphemes: Vec<Grapheme>) -> Result<Self, LanguageError> {
        let distribution = if graphemes.is_empty() {
            None
        } else {
            let weights = graphemes.iter().map(|g| g.weight);
            Some(
                WeightedIndex::new(weights)
                    .map_err(|_| LanguageError::InvalidWeights(format!("{} graphemes", kind)))?,
            )
        };
        Ok(Self {
            graphemes,
            distribution,
        })
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        match &self.distribution {
            Some(distribution) => &self.graphemes[distribution.sample(rng)].text,
            None => "",
        }
    }

    fn contains(&self, text: &str) -> bool {
        self.graphemes.iter().any(|g| g.text == text)
    }
}

/// A generator of words for one language.
#[derive(Debug, Clone)]
pub struct Language {
    name: String,
    vowels: Inventory,
    consonants: Inventory,
    affixes: Inventory,
    template: SyllableTemplate,
    syllable_weights: Vec<u32>,
    syllable_count: WeightedIndex<u32>,
    alphabet: FxHashSet<char>,
    validator: Validator,
    max_attempts: u32,
}

impl Language {
    pub fn from_def(def: LanguageDef) -> Result<Language, LanguageError> {
        let mut validator = Validator::new(def.minimum_length);
        if let Some(pattern) = &def.pattern {
            validator = validator.with_pattern(pattern)?;
        }
        if let Some(forbidden) = &def.forbidden {
            validator = validator.with_forbidden(forbidden)?;
        }

        let template = SyllableTemplate::parse(&def.syllable_template)?;
        let inventories = [
            (PhonemeKind::Vowel, &def.vowels),
            (PhonemeKind::Consonant, &def.consonants),
            (PhonemeKind::Affix, &def.affixes),
        ];
        for (kind, graphemes) in inventories {
            if template.uses(kind) && graphemes.is_empty() {
                return Err(LanguageError::EmptyPhoneme {
                    language: def.name.clone(),
                    kind,
                });
            }
        }

        let syllable_count = WeightedIndex::new(&def.syllable_weights)
            .map_err(|_| LanguageError::InvalidWeights(format!("{} syllables", def.name)))?;

        let alphabet = def
            .vowels
            .iter()
            .chain(&def.consonants)
            .chain(&def.affixes)
            .flat_map(|g| g.text.chars())
            .collect();

        Ok(Language {
            name: def.name,
            vowels: Inventory::new(PhonemeKind::Vowel, def.vowels)?,
            consonants: Inventory::new(PhonemeKind::Consonant, def.consonants)?,
            affixes: Inventory::new(PhonemeKind::Affix, def.affixes)?,
            template,
            syllable_weights: def.syllable_weights,
            syllable_count,
            alphabet,
            validator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    pub fn load_from_ron(path: &Path) -> Result<Language, LanguageError> {
        let language = Self::from_def(LanguageDef::load_from_ron(path)?)?;
        tracing::info!(path = %path.display(), language = %language.name, "loaded language");
        Ok(language)
    }

    pub fn parse_ron(input: &str) -> Result<Language, LanguageError> {
        Self::from_def(LanguageDef::parse_ron(input)?)
    }

    /// Override how many candidates `word` tries before failing.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &SyllableTemplate {
        &self.template
    }

    pub fn syllable_weights(&self) -> &[u32] {
        &self.syllable_weights
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Generate one valid word.
    ///
    /// The syllable count is drawn once; candidates of that length are
    /// generated until one passes the validator or the attempt budget runs
    /// out.
    pub fn word<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, LanguageError> {
        let syllables = self.syllable_count.sample(rng) + 1;
        for attempt in 1..=self.max_attempts {
            let candidate: String = (0..syllables).map(|_| self.syllable(rng)).collect();
            if self.is_valid_word(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(
                language = %self.name,
                attempt,
                candidate = %candidate,
                "rejected word"
            );
        }
        Err(LanguageError::Exhausted {
            language: self.name.clone(),
            attempts: self.max_attempts,
        })
    }

    /// An endless stream of valid words. The stream ends early only if a
    /// word cannot be found within the attempt budget.
    pub fn words<'a, R: Rng + ?Sized>(&'a self, rng: &'a mut R) -> Words<'a, R> {
        Words {
            language: self,
            rng,
            exhausted: false,
        }
    }

    /// Whether `word` could have been produced by this language: every
    /// letter belongs to its graphemes and the validator accepts it.
    pub fn is_valid_word(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        !word.is_empty()
            && word.chars().all(|c| self.alphabet.contains(&c))
            && self.validator.check(&word)
    }

    pub fn is_valid_grapheme(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.vowels.contains(&text)
            || self.consonants.contains(&text)
            || self.affixes.contains(&text)
    }

    fn syllable<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut syllable = String::new();
        for part in &self.template.parts {
            if !part.required && rng.gen_bool(0.5) {
                continue;
            }
            let inventory = match part.kind {
                PhonemeKind::Consonant => &self.consonants,
                PhonemeKind::Vowel => &self.vowels,
                PhonemeKind::Affix => &self.affixes,
            };
            syllable.push_str(inventory.pick(rng));
        }
        syllable
    }
}

/// Lazy sequence of words returned by [`Language::words`].
pub struct Words<'a, R: Rng + ?Sized> {
    language: &'a Language,
    rng: &'a mut R,
    exhausted: bool,
}

impl<R: Rng + ?Sized> Iterator for Words<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        match self.language.word(self.rng) {
            Ok(word) => Some(word),
            Err(e) => {
                tracing::warn!(language = %self.language.name, error = %e, "word stream ended");
                self.exhausted = true;
                None
            }
        }
    }
}
