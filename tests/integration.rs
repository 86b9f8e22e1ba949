//! Integration tests: Telegram HTML export -> records -> table -> normalized table

use chatsense::analysis::analyze_records;
use chatsense::classify::{Classifier, ModelHandle, Prediction, Sentiment};
use chatsense::config::CsvOptions;
use chatsense::core::{CHAT_COLUMNS, read_csv};
use chatsense::prelude::*;
use std::fs;
use tempfile::tempdir;

const EXPORT: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"/></head><body>
<div class="history">
 <div class="message service" id="message-1">
  <div class="body details">15 March 2024</div>
 </div>
 <div class="message default clearfix" id="message1">
  <div class="body">
   <div class="pull_right date details" title="15.03.2024 10:05:00 UTC+03:00">10:05</div>
   <div class="from_name">Алиса</div>
   <div class="text">Хорошие новости!</div>
  </div>
 </div>
 <div class="message default clearfix joined" id="message2">
  <div class="body">
   <div class="pull_right date details" title="15.03.2024 10:06:00 UTC+03:00">10:06</div>
   <div class="text">Маша, мне очень понравились 2 фильма!</div>
  </div>
 </div>
 <div class="message default clearfix" id="message3">
  <div class="body">
   <div class="pull_right date details" title="16.03.2024 22:15:00 UTC+03:00">22:15</div>
   <div class="from_name">Борис</div>
   <div class="text">Это было ужасно</div>
  </div>
 </div>
 <div class="message default clearfix" id="message4">
  <div class="body">
   <div class="pull_right date details" title="17.03.2024 09:00:00 UTC+03:00">09:00</div>
   <div class="from_name">Борис</div>
   <div class="forwarded body">
    <div class="from_name">Мария<span class="date details" title="01.01.2024 12:00:00"> 01.01.2024 12:00:00</span></div>
    <div class="text">Иван сказал, что это не хорошо!</div>
   </div>
  </div>
 </div>
 <div class="message default clearfix joined" id="message5">
  <div class="body">
   <div class="pull_right date details" title="17.03.2024 09:01:00 UTC+03:00">09:01</div>
   <div class="media_wrap clearfix"><div class="photo_wrap"></div></div>
  </div>
 </div>
 <div class="message default clearfix joined" id="message6">
  <div class="body">
   <div class="pull_right date details" title="17.03.2024 09:02:00 UTC+03:00">09:02</div>
   <div class="text">Согласен</div>
  </div>
 </div>
</div>
</body></html>"#;

fn parse_export() -> Vec<ChatMessageRecord> {
    TelegramHtmlParser::new().parse_str(EXPORT).unwrap()
}

// =========================================================================
// Parsing
// =========================================================================

#[test]
fn test_parse_export_records() {
    let records = parse_export();
    assert_eq!(records.len(), 5);

    assert_eq!(records[0].sender(), Some("Алиса"));
    assert_eq!(records[0].message, "Хорошие новости!");
    assert_eq!(records[0].date, "15.03.2024");
    assert_eq!(records[0].time, "10:05");
}

#[test]
fn test_parse_joined_block_inherits_sender() {
    let records = parse_export();
    assert_eq!(records[1].sender(), Some("Алиса"));
    assert_eq!(records[1].message, "Маша, мне очень понравились 2 фильма!");
}

#[test]
fn test_parse_forwarded_sender_carries_forward() {
    let records = parse_export();
    assert_eq!(records[3].sender(), Some("Мария"));
    assert_eq!(records[3].message, "Иван сказал, что это не хорошо!");
    // The forwarded author's timestamp span is not part of the name,
    // and the joined block after it is attributed to the same author.
    assert_eq!(records[4].sender(), Some("Мария"));
    assert_eq!(records[4].message, "Согласен");
    assert_eq!(records[4].time, "09:02");
}

#[test]
fn test_parse_file_matches_parse_str() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("messages.html");
    fs::write(&path, EXPORT).unwrap();

    let parser = TelegramHtmlParser::new();
    let from_file = parser.parse(&path).unwrap();
    assert_eq!(from_file, parse_export());

    let from_str_path = parser.parse_file(path.to_str().unwrap()).unwrap();
    assert_eq!(from_str_path.len(), 5);
}

#[test]
fn test_parser_is_reusable() {
    let parser = TelegramHtmlParser::new();
    let first = parser.parse_str(EXPORT).unwrap();

    // A joined block at the start of a new document has no sender, even
    // though the previous call ended with one.
    let orphan = r#"<div class="message joined"><div class="text">без автора</div></div>"#;
    let second = parser.parse_str(orphan).unwrap();

    assert_eq!(first.len(), 5);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].sender(), None);
}

// =========================================================================
// Assembly and filtering
// =========================================================================

#[test]
fn test_to_table_columns_and_order() {
    let table = to_table(&parse_export());
    assert_eq!(table.columns(), CHAT_COLUMNS.map(String::from).as_slice());
    assert_eq!(table.len(), 5);
    assert_eq!(table.get(2, "Sender"), Some("Борис"));
    assert_eq!(table.get(2, "Date"), Some("16.03.2024"));
}

#[test]
fn test_filter_then_assemble() {
    let config = FilterConfig::new()
        .with_date_from("2024-03-16")
        .unwrap()
        .with_sender("мария");
    let records = apply_filters(parse_export(), &config);
    assert_eq!(records.len(), 2);

    let table = to_table(&records);
    assert_eq!(table.get(0, "Message"), Some("Иван сказал, что это не хорошо!"));
}

// =========================================================================
// Preprocessing
// =========================================================================

#[test]
fn test_full_chat_pipeline() {
    let table = to_table(&parse_export());
    let cleaned = PreprocessingPipeline::default()
        .preprocess_dataset(&table)
        .unwrap();

    let messages = cleaned.column("Message").unwrap();
    assert_eq!(
        messages,
        vec![
            Some("хороший новость"),
            Some("очень понравиться фильм"),
            Some("это ужасно"),
            Some("сказать это не хорошо"),
            Some("согласный"),
        ]
    );

    // Other columns pass through untouched
    assert_eq!(cleaned.get(3, "Sender"), Some("Мария"));
    assert_eq!(cleaned.get(3, "Time"), Some("09:00"));
}

#[test]
fn test_csv_dataset_pipeline() {
    let csv = "id;Text\n1;Отличный фильм!\n2;\n3;12 345\n4;Это не плохо\n";
    let table = read_csv(csv.as_bytes(), CsvOptions::new().with_delimiter(b';')).unwrap();
    assert_eq!(table.len(), 4);

    let pipeline = PreprocessingPipeline::new(PipelineConfig::new().with_target_column("Text"));
    let cleaned = pipeline.preprocess_dataset(&table).unwrap();

    assert_eq!(cleaned.len(), 2);
    assert_eq!(cleaned.get(0, "id"), Some("1"));
    assert_eq!(cleaned.get(0, "Text"), Some("отличный фильм"));
    assert_eq!(cleaned.get(1, "id"), Some("4"));
    assert_eq!(cleaned.get(1, "Text"), Some("это не плохо"));
}

#[test]
fn test_missing_target_column() {
    let table = to_table(&parse_export());
    let pipeline = PreprocessingPipeline::new(PipelineConfig::new().with_target_column("Text"));
    let err = pipeline.preprocess_dataset(&table).unwrap_err();

    assert!(err.is_column_not_found());
    let msg = err.to_string();
    assert!(msg.contains("Text"));
    assert!(msg.contains("Message"));
}

#[test]
fn test_extra_retained_word() {
    let default = PreprocessingPipeline::default();
    let keep = PreprocessingPipeline::new(PipelineConfig::new().with_retained_word("всегда"));

    assert_eq!(default.preprocess_text("Всегда рад").unwrap(), "радый");
    assert_eq!(keep.preprocess_text("Всегда рад").unwrap(), "всегда радый");
}

// =========================================================================
// Classification
// =========================================================================

struct Keywords;

impl Classifier for Keywords {
    fn classify(&self, text: &str) -> chatsense::Result<Prediction> {
        let label = if text.contains("ужасно") || text.contains("не хорошо") {
            "LABEL_2"
        } else if text.contains("хороший") || text.contains("понравиться") {
            "LABEL_1"
        } else {
            "LABEL_0"
        };
        Ok(Prediction::new(label, 0.9))
    }
}

#[test]
fn test_analyze_parsed_chat() {
    let records = parse_export();
    let handle = ModelHandle::new(Keywords);
    let analysis = analyze_records(
        &records,
        &PreprocessingPipeline::default(),
        handle.current().as_ref(),
    )
    .unwrap();

    assert_eq!(analysis.len(), 5);
    let distribution = analysis.label_distribution();
    assert_eq!(distribution[&Sentiment::Positive], 2);
    assert_eq!(distribution[&Sentiment::Negative], 2);
    assert_eq!(distribution[&Sentiment::Neutral], 1);

    let top = analysis.top_positive(1);
    assert_eq!(top[0].sender, "Алиса");
    assert!((top[0].mean - 3.0).abs() < f64::EPSILON);

    let lowest = analysis.top_negative(1);
    assert_eq!(lowest[0].sender, "Борис");
}
