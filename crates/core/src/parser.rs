//! Model Output Parsing and Validation
//!
//! Turns the raw completion text of a quiz generation call into validated
//! `QuizQuestion`s. A response that is not JSON or lacks the `questions`
//! array fails as a whole; individual bad questions are dropped one by one
//! so a single malformed item does not void an otherwise good batch. Every
//! drop is recorded with its reason.
//!
//! Surviving questions get fresh identifiers composed from the generation
//! batch stamp and the item's position; nothing the model echoes back is
//! ever used as an id downstream.

use crate::error::GenerationError;
use crate::quiz::{QuizDifficulty, QuizOption, QuizQuestion, RejectedQuestion};
use serde::Deserialize;
use tracing::warn;

/// Every question must offer exactly this many alternatives.
pub const OPTION_COUNT: usize = 4;

/// The outcome of parsing one model response: the questions that survived
/// validation and the ones that were discarded, with reasons.
#[derive(Debug)]
pub struct ParsedQuestions {
    pub questions: Vec<QuizQuestion>,
    pub rejected: Vec<RejectedQuestion>,
}

/// One question as the model produced it. Fields are loose on purpose: the
/// model sometimes emits options as bare strings, sometimes as labeled
/// objects, and identifies the correct answer by option id, letter, or
/// numeric index.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<RawOption>>,
    #[serde(default, rename = "correctOptionId")]
    correct_option_id: Option<String>,
    #[serde(default, rename = "correctIndex")]
    correct_index: Option<usize>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOption {
    Labeled {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
    Bare(String),
}

impl RawOption {
    fn text(&self) -> Option<&str> {
        match self {
            RawOption::Labeled { text, .. } => text.as_deref(),
            RawOption::Bare(text) => Some(text.as_str()),
        }
    }

    fn declared_id(&self) -> Option<&str> {
        match self {
            RawOption::Labeled { id, .. } => id.as_deref(),
            RawOption::Bare(_) => None,
        }
    }
}

/// Parses and validates the raw model output.
///
/// `batch` is a caller-supplied stamp (generation timestamp in millis) mixed
/// into every fresh id so concurrent generations never collide.
pub fn parse_quiz_questions(
    raw: &str,
    difficulty: QuizDifficulty,
    batch: i64,
) -> Result<ParsedQuestions, GenerationError> {
    let document: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| GenerationError::MalformedResponse(format!("Resposta não é JSON válido: {}", err)))?;

    let items = document
        .get("questions")
        .and_then(|value| value.as_array())
        .ok_or_else(|| {
            GenerationError::MalformedResponse(
                "Formato de resposta inválido: campo \"questions\" não encontrado".to_string(),
            )
        })?;

    let mut questions = Vec::new();
    let mut rejected = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match validate_question(item, difficulty, batch, index) {
            Ok(question) => questions.push(question),
            Err(reason) => {
                warn!(index, %reason, "Discarding invalid question from model output");
                rejected.push(RejectedQuestion { index, reason });
            }
        }
    }

    Ok(ParsedQuestions { questions, rejected })
}

fn validate_question(
    item: &serde_json::Value,
    difficulty: QuizDifficulty,
    batch: i64,
    index: usize,
) -> Result<QuizQuestion, String> {
    let raw: RawQuestion = serde_json::from_value(item.clone())
        .map_err(|_| "item does not match the expected question shape".to_string())?;

    let question_text = raw
        .question
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| "missing or empty question text".to_string())?
        .to_string();

    let options = raw
        .options
        .as_deref()
        .ok_or_else(|| "missing options array".to_string())?;
    if options.len() != OPTION_COUNT {
        return Err(format!(
            "expected exactly {} options, got {}",
            OPTION_COUNT,
            options.len()
        ));
    }

    let mut texts = Vec::with_capacity(OPTION_COUNT);
    for (position, option) in options.iter().enumerate() {
        let text = option
            .text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| format!("option {} has empty text", position))?;
        texts.push(text.to_string());
    }

    let correct_index = resolve_correct_index(&raw, options)
        .ok_or_else(|| "correct option reference does not resolve to any option".to_string())?;

    let question_id = format!("q_{}_{}", batch, index);
    let fresh_options: Vec<QuizOption> = texts
        .into_iter()
        .enumerate()
        .map(|(position, text)| QuizOption {
            id: format!("{}_opt_{}", question_id, position),
            text,
        })
        .collect();

    Ok(QuizQuestion {
        correct_answer_id: fresh_options[correct_index].id.clone(),
        id: question_id,
        question: question_text,
        options: fresh_options,
        explanation: raw
            .explanation
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()),
        difficulty: Some(difficulty),
    })
}

/// Works out which option the model marked correct, trying the declared
/// option id, the positional letter (A-D), and a numeric index in that order.
fn resolve_correct_index(raw: &RawQuestion, options: &[RawOption]) -> Option<usize> {
    if let Some(index) = raw.correct_index {
        if index < options.len() {
            return Some(index);
        }
    }

    let reference = raw.correct_option_id.as_deref()?.trim();
    if reference.is_empty() {
        return None;
    }

    for (index, option) in options.iter().enumerate() {
        let letter = char::from(b'A' + index as u8).to_string();
        let declared = option.declared_id().unwrap_or(letter.as_str());
        if declared.eq_ignore_ascii_case(reference) {
            return Some(index);
        }
    }

    if let Ok(index) = reference.parse::<usize>() {
        if index < options.len() {
            return Some(index);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: i64 = 1700000000000;

    fn labeled_question(question: &str, correct: &str) -> serde_json::Value {
        serde_json::json!({
            "question": question,
            "options": [
                { "id": "A", "text": "Primeira" },
                { "id": "B", "text": "Segunda" },
                { "id": "C", "text": "Terceira" },
                { "id": "D", "text": "Quarta" }
            ],
            "correctOptionId": correct,
            "explanation": "Porque sim."
        })
    }

    fn parse(value: serde_json::Value) -> ParsedQuestions {
        parse_quiz_questions(&value.to_string(), QuizDifficulty::Medio, BATCH).unwrap()
    }

    #[test]
    fn test_parses_well_formed_batch() {
        let payload = serde_json::json!({
            "questions": [
                labeled_question("Quanto é 1/2 + 1/4?", "A"),
                labeled_question("Qual fração equivale a 0,5?", "B"),
            ]
        });

        let parsed = parse(payload);
        assert_eq!(parsed.questions.len(), 2);
        assert!(parsed.rejected.is_empty());

        let first = &parsed.questions[0];
        assert_eq!(first.options.len(), OPTION_COUNT);
        assert_eq!(first.id, format!("q_{}_0", BATCH));
        assert_eq!(first.correct_answer_id, format!("q_{}_0_opt_0", BATCH));
        assert_eq!(first.difficulty, Some(QuizDifficulty::Medio));
        assert_eq!(first.explanation.as_deref(), Some("Porque sim."));
    }

    #[test]
    fn test_fresh_ids_never_reuse_model_ids() {
        let parsed = parse(serde_json::json!({
            "questions": [labeled_question("Pergunta?", "C")]
        }));
        let question = &parsed.questions[0];
        assert!(question.options.iter().all(|opt| opt.id.starts_with(&question.id)));
        assert_eq!(question.correct_answer_id, question.options[2].id);
    }

    #[test]
    fn test_invalid_json_is_malformed_response() {
        let err = parse_quiz_questions("not json at all", QuizDifficulty::Facil, BATCH).unwrap_err();
        match err {
            GenerationError::MalformedResponse(msg) => assert!(msg.contains("JSON")),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_questions_field_is_malformed_response() {
        let err =
            parse_quiz_questions(r#"{"items": []}"#, QuizDifficulty::Facil, BATCH).unwrap_err();
        match err {
            GenerationError::MalformedResponse(msg) => assert!(msg.contains("questions")),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_questions_not_an_array_is_malformed_response() {
        let result =
            parse_quiz_questions(r#"{"questions": "nope"}"#, QuizDifficulty::Facil, BATCH);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_option_count_dropped_with_reason() {
        let payload = serde_json::json!({
            "questions": [
                {
                    "question": "Só duas opções?",
                    "options": [
                        { "id": "A", "text": "Sim" },
                        { "id": "B", "text": "Não" }
                    ],
                    "correctOptionId": "A"
                },
                labeled_question("Essa é válida?", "D"),
            ]
        });

        let parsed = parse(payload);
        assert_eq!(parsed.questions.len(), 1);
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].index, 0);
        assert!(parsed.rejected[0].reason.contains("4 options"));
        // The surviving question keeps its position in the batch in its id.
        assert_eq!(parsed.questions[0].id, format!("q_{}_1", BATCH));
    }

    #[test]
    fn test_empty_question_text_dropped() {
        let parsed = parse(serde_json::json!({
            "questions": [labeled_question("   ", "A")]
        }));
        assert!(parsed.questions.is_empty());
        assert!(parsed.rejected[0].reason.contains("question text"));
    }

    #[test]
    fn test_empty_option_text_dropped() {
        let payload = serde_json::json!({
            "questions": [{
                "question": "Pergunta?",
                "options": [
                    { "id": "A", "text": "Primeira" },
                    { "id": "B", "text": "" },
                    { "id": "C", "text": "Terceira" },
                    { "id": "D", "text": "Quarta" }
                ],
                "correctOptionId": "A"
            }]
        });
        let parsed = parse(payload);
        assert!(parsed.questions.is_empty());
        assert!(parsed.rejected[0].reason.contains("option 1"));
    }

    #[test]
    fn test_unresolvable_correct_reference_dropped() {
        let parsed = parse(serde_json::json!({
            "questions": [labeled_question("Pergunta?", "E")]
        }));
        assert!(parsed.questions.is_empty());
        assert!(parsed.rejected[0].reason.contains("does not resolve"));
    }

    #[test]
    fn test_bare_string_options_with_numeric_index() {
        let payload = serde_json::json!({
            "questions": [{
                "question": "Qual é a capital do Brasil?",
                "options": ["Brasília", "São Paulo", "Rio de Janeiro", "Salvador"],
                "correctIndex": 0,
                "explanation": "Brasília é a capital federal desde 1960."
            }]
        });

        let parsed = parse(payload);
        assert_eq!(parsed.questions.len(), 1);
        let question = &parsed.questions[0];
        assert_eq!(question.correct_answer_id, question.options[0].id);
    }

    #[test]
    fn test_letter_reference_against_unlabeled_options() {
        let payload = serde_json::json!({
            "questions": [{
                "question": "2 + 2?",
                "options": ["3", "4", "5", "6"],
                "correctOptionId": "B"
            }]
        });

        let parsed = parse(payload);
        assert_eq!(parsed.questions.len(), 1);
        assert_eq!(
            parsed.questions[0].correct_answer_id,
            parsed.questions[0].options[1].id
        );
    }

    #[test]
    fn test_numeric_string_reference() {
        let payload = serde_json::json!({
            "questions": [{
                "question": "2 + 3?",
                "options": ["4", "5", "6", "7"],
                "correctOptionId": "1"
            }]
        });

        let parsed = parse(payload);
        assert_eq!(parsed.questions.len(), 1);
        assert_eq!(
            parsed.questions[0].correct_answer_id,
            parsed.questions[0].options[1].id
        );
    }

    #[test]
    fn test_out_of_range_correct_index_dropped() {
        let payload = serde_json::json!({
            "questions": [{
                "question": "Pergunta?",
                "options": ["a", "b", "c", "d"],
                "correctIndex": 7
            }]
        });
        let parsed = parse(payload);
        assert!(parsed.questions.is_empty());
    }

    #[test]
    fn test_missing_explanation_is_tolerated() {
        let payload = serde_json::json!({
            "questions": [{
                "question": "Pergunta sem explicação?",
                "options": ["a", "b", "c", "d"],
                "correctIndex": 2
            }]
        });
        let parsed = parse(payload);
        assert_eq!(parsed.questions.len(), 1);
        assert!(parsed.questions[0].explanation.is_none());
    }

    #[test]
    fn test_non_object_item_dropped() {
        let payload = serde_json::json!({
            "questions": ["isto não é uma questão", labeled_question("Válida?", "A")]
        });
        let parsed = parse(payload);
        assert_eq!(parsed.questions.len(), 1);
        assert_eq!(parsed.rejected.len(), 1);
    }
}
