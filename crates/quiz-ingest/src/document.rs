//! Category document parsing.
//!
//! A category document is `{questions: [{question, answers: [{answer, correct}]}]}`.
//! Bad questions and bad answers are dropped one at a time, with a warning
//! naming their position.

use quiz_core::entities::NewAnswer;
use quiz_core::responses::IngestReport;
use serde_json::Value;

/// A question ready to hand to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    /// Position in the document's `questions` array.
    pub index: usize,
    pub question: String,
    pub answers: Vec<NewAnswer>,
}

/// Extract the well-formed questions of one category document.
///
/// Returns `Err` with a message when the document as a whole is unusable:
/// not an object, or `questions` absent or not an array.
pub fn parse_document(
    name: &str,
    value: &Value,
    report: &mut IngestReport,
) -> Result<Vec<ParsedQuestion>, String> {
    let items = value
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| "document has no questions array".to_string())?;

    let mut questions = Vec::with_capacity(items.len());
    for (qi, item) in items.iter().enumerate() {
        let location = format!("{name}: questions[{qi}]");
        match parse_question(qi, &location, item, report) {
            Ok(question) => questions.push(question),
            Err(message) => skip(report, location, message),
        }
    }
    Ok(questions)
}

fn parse_question(
    index: usize,
    location: &str,
    item: &Value,
    report: &mut IngestReport,
) -> Result<ParsedQuestion, String> {
    let text = item
        .get("question")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or("missing question text")?;
    let items = item
        .get("answers")
        .and_then(Value::as_array)
        .ok_or("answers is not a list")?;

    let mut answers = Vec::with_capacity(items.len());
    for (ai, answer) in items.iter().enumerate() {
        match parse_answer(answer) {
            Ok(answer) => answers.push(answer),
            Err(message) => skip(report, format!("{location}.answers[{ai}]"), message),
        }
    }

    Ok(ParsedQuestion {
        index,
        question: text.to_string(),
        answers,
    })
}

fn parse_answer(item: &Value) -> Result<NewAnswer, &'static str> {
    let text = item
        .get("answer")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or("missing answer text")?;
    let correct = item
        .get("correct")
        .and_then(Value::as_bool)
        .ok_or("correct is not a boolean")?;
    Ok(NewAnswer::new(text, correct))
}

fn skip(report: &mut IngestReport, location: String, message: impl Into<String>) {
    let message = message.into();
    tracing::warn!(%location, %message, "skipping item");
    report.warn(location, message);
}
