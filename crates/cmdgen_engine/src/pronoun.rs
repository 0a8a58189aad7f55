//! English personal and possessive pronouns.

use cmdgen_entities::Gender;

/// Grammatical case of a pronoun.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PronounCase {
    /// I, you, he, she, it, we, they.
    Subjective,
    /// Me, you, him, her, it, us, them.
    Objective,
    /// Mine, yours, his, hers, its, ours, theirs.
    PossessiveAbsolute,
    /// My, your, his, her, its, our, their.
    PossessiveAdjective,
}

impl PronounCase {
    /// Reads the case from a `{pron}` type tag.
    ///
    /// `sub...` is subjective, `pab...` and `posabs...` possessive absolute,
    /// `paj...` and other `pos...` possessive adjective. Anything else,
    /// including no tag, is objective.
    #[must_use]
    pub fn from_type_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::Objective;
        };
        if tag.starts_with("sub") {
            Self::Subjective
        } else if tag.starts_with("pab") || tag.starts_with("posabs") {
            Self::PossessiveAbsolute
        } else if tag.starts_with("paj") || tag.starts_with("pos") {
            Self::PossessiveAdjective
        } else {
            Self::Objective
        }
    }
}

/// Grammatical person.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Person {
    /// The speaker.
    First,
    /// The hearer.
    Second,
    /// Anyone else.
    Third,
}

/// Grammatical number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Number {
    /// One.
    Singular,
    /// More than one.
    Plural,
}

/// Gender of the referred noun. Only the third person singular varies by it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PronounGender {
    /// He.
    Masculine,
    /// She.
    Feminine,
    /// It.
    #[default]
    Neutral,
}

impl From<Option<Gender>> for PronounGender {
    fn from(gender: Option<Gender>) -> Self {
        match gender {
            Some(Gender::Male) => Self::Masculine,
            Some(Gender::Female) => Self::Feminine,
            None => Self::Neutral,
        }
    }
}

/// Looks up a pronoun.
#[must_use]
pub fn pronoun(case: PronounCase, person: Person, number: Number, gender: PronounGender) -> &'static str {
    use Number::{Plural, Singular};
    use Person::{First, Second, Third};
    use PronounCase::{Objective, PossessiveAbsolute, PossessiveAdjective, Subjective};
    use PronounGender::{Feminine, Masculine, Neutral};

    match (case, person, number) {
        (Subjective, First, Singular) => "I",
        (Subjective, First, Plural) => "we",
        (Subjective, Second, _) | (Objective, Second, _) => "you",
        (Subjective, Third, Plural) => "they",
        (Subjective, Third, Singular) => match gender {
            Masculine => "he",
            Feminine => "she",
            Neutral => "it",
        },

        (Objective, First, Singular) => "me",
        (Objective, First, Plural) => "us",
        (Objective, Third, Plural) => "them",
        (Objective, Third, Singular) => match gender {
            Masculine => "him",
            Feminine => "her",
            Neutral => "it",
        },

        (PossessiveAbsolute, First, Singular) => "mine",
        (PossessiveAbsolute, First, Plural) => "ours",
        (PossessiveAbsolute, Second, _) => "yours",
        (PossessiveAbsolute, Third, Plural) => "theirs",
        (PossessiveAbsolute, Third, Singular) => match gender {
            Masculine => "his",
            Feminine => "hers",
            Neutral => "its",
        },

        (PossessiveAdjective, First, Singular) => "my",
        (PossessiveAdjective, First, Plural) => "our",
        (PossessiveAdjective, Second, _) => "your",
        (PossessiveAdjective, Third, Plural) => "their",
        (PossessiveAdjective, Third, Singular) => match gender {
            Masculine => "his",
            Feminine => "her",
            Neutral => "its",
        },
    }
}

/// The third person singular pronoun a `{pron}` wildcard with `type_tag` renders as.
#[must_use]
pub fn third_person(type_tag: Option<&str>, gender: PronounGender) -> &'static str {
    pronoun(
        PronounCase::from_type_tag(type_tag),
        Person::Third,
        Number::Singular,
        gender,
    )
}
