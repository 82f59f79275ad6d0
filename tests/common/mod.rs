//! Shared fixtures: in-memory PDFs and a word-level fake model.
#![allow(dead_code)]

use std::sync::Mutex;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdfbrief::{GenerationParams, Result, SummaryModel};

/// One run of text at an absolute position.
pub struct Text {
    pub text: String,
    pub x: i64,
    pub y: i64,
    pub size: i64,
}

pub fn text(text: &str, x: i64, y: i64, size: i64) -> Text {
    Text {
        text: text.to_string(),
        x,
        y,
        size,
    }
}

/// Build a PDF with one page per entry, each run drawn in Helvetica.
pub fn build_pdf(pages: &[Vec<Text>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for runs in pages {
        let mut operations = Vec::new();
        for run in runs {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), run.size.into()]));
            operations.push(Operation::new("Td", vec![run.x.into(), run.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(run.text.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// `n` distinct words.
pub fn words(n: usize) -> String {
    (0..n)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One token per word; a summary is the first `max_length` words.
pub struct WordModel {
    pub budget: usize,
    vocab: Mutex<Vec<String>>,
    calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl WordModel {
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            vocab: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, GenerationParams)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SummaryModel for WordModel {
    fn max_input_tokens(&self) -> usize {
        self.budget
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let mut vocab = self.vocab.lock().unwrap();
        Ok(text
            .split_whitespace()
            .map(|word| match vocab.iter().position(|w| w == word) {
                Some(id) => id as u32,
                None => {
                    vocab.push(word.to_string());
                    (vocab.len() - 1) as u32
                }
            })
            .collect())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        let vocab = self.vocab.lock().unwrap();
        Ok(tokens
            .iter()
            .map(|&t| vocab[t as usize].as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String> {
        self.calls.lock().unwrap().push((text.to_string(), *params));
        Ok(text
            .split_whitespace()
            .take(params.max_length)
            .collect::<Vec<_>>()
            .join(" "))
    }
}
