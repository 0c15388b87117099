//! Display labels for report cells
//!
//! Labels are resolved only when rows are rendered; engine state never keys
//! on display text.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum Locale {
    #[default]
    En,
    Es,
}

/// Fixed report labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Username,
    Email,
    ExternalId,
    Attempts,
    PointsEarned,
    PointsPossible,
    Score,
    Analytics,
    Percent,
    Enrolled,
    Answered,
    NotAnswered,
    Mean,
    StdDev,
    Questions,
    Correct,
    PctCorrect,
    Incorrect,
    PctIncorrect,
    MostCorrect,
    LeastCorrect,
    QuestionTableTitle,
    CorrectAnswer,
    DifficultyIndex,
    DiscriminationBand,
    DiscriminationIndex,
}

impl Label {
    #[must_use]
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en(),
            Locale::Es => self.es(),
        }
    }

    fn en(self) -> &'static str {
        match self {
            Label::Username => "Username",
            Label::Email => "Email",
            Label::ExternalId => "External ID",
            Label::Attempts => "Attempts",
            Label::PointsEarned => "Points earned",
            Label::PointsPossible => "Points possible",
            Label::Score => "Score",
            Label::Analytics => "Analytics",
            Label::Percent => "%",
            Label::Enrolled => "Enrolled users",
            Label::Answered => "Answered",
            Label::NotAnswered => "Did not answer",
            Label::Mean => "Mean",
            Label::StdDev => "Standard deviation",
            Label::Questions => "Question(s)",
            Label::Correct => "Correct",
            Label::PctCorrect => "% correct",
            Label::Incorrect => "Incorrect",
            Label::PctIncorrect => "% incorrect",
            Label::MostCorrect => "Question with most correct answers",
            Label::LeastCorrect => "Question with fewest correct answers",
            Label::QuestionTableTitle => "Questions",
            Label::CorrectAnswer => "Answer",
            Label::DifficultyIndex => "Difficulty index",
            Label::DiscriminationBand => "Discrimination range",
            Label::DiscriminationIndex => "Discrimination index",
        }
    }

    fn es(self) -> &'static str {
        match self {
            Label::Username => "Username",
            Label::Email => "Email",
            Label::ExternalId => "Documento_id",
            Label::Attempts => "Intentos",
            Label::PointsEarned => "Ptos Obtenidos",
            Label::PointsPossible => "Total de la Pregunta",
            Label::Score => "Nota",
            Label::Analytics => "Analitica",
            Label::Percent => "%",
            Label::Enrolled => "Usuarios inscritos",
            Label::Answered => "Cuantos contestaron",
            Label::NotAnswered => "Cuantos no contestaron",
            Label::Mean => "Promedio",
            Label::StdDev => "Desviacion estandar",
            Label::Questions => "Pregunta(s)",
            Label::Correct => "Correctas",
            Label::PctCorrect => "% de Correctas",
            Label::Incorrect => "Incorrectas",
            Label::PctIncorrect => "% de Incorrectas",
            Label::MostCorrect => "Pregunta con mas correctas",
            Label::LeastCorrect => "Pregunta con menos correctas",
            Label::QuestionTableTitle => "Preguntas",
            Label::CorrectAnswer => "Respuesta",
            Label::DifficultyIndex => "Indice de dificultad",
            Label::DiscriminationBand => "Rango indice discriminatorio",
            Label::DiscriminationIndex => "Indice discriminatorio",
        }
    }
}

/// Column title of the `n`-th question (1-based).
#[must_use]
pub fn question_column(locale: Locale, n: usize) -> String {
    match locale {
        Locale::En => format!("Question {n}"),
        Locale::Es => format!("Pregunta {n}"),
    }
}

/// Short reference to the `n`-th question (1-based), as used in tie lists.
#[must_use]
pub fn question_short(n: usize) -> String {
    format!("P{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_value_names() {
        assert_eq!(Locale::from_str("es", false), Ok(Locale::Es));
        assert_eq!(Locale::from_str("EN", true), Ok(Locale::En));
        assert!(Locale::from_str("EN", false).is_err());
        assert!(Locale::from_str("fr", true).is_err());
    }

    #[test]
    fn test_locale_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Locale::Es).unwrap(), r#""es""#);
        let locale: Locale = serde_json::from_str(r#""en""#).unwrap();
        assert_eq!(locale, Locale::En);
    }

    #[test]
    fn test_question_labels() {
        assert_eq!(question_column(Locale::En, 3), "Question 3");
        assert_eq!(question_column(Locale::Es, 1), "Pregunta 1");
        assert_eq!(question_short(12), "P12");
        assert_eq!(Label::Mean.text(Locale::Es), "Promedio");
    }
}
