use anyhow::{bail, Context, Result};
use search_core::{DocId, DocumentStatus, SearchEngine};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Collect `.json` / `.jsonl` files under `input`, sorted for a stable load order.
pub fn input_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} is neither a file nor a directory", input.display());
    }
    Ok(files)
}

pub fn read_docs(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut docs = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let doc = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}: bad document", file.display(), n + 1))?;
            docs.push(doc);
        }
        Ok(docs)
    } else {
        let json: serde_json::Value = serde_json::from_reader(reader)?;
        let docs = if json.is_array() {
            serde_json::from_value(json)?
        } else {
            vec![serde_json::from_value(json)?]
        };
        Ok(docs)
    }
}

/// Add every document found under `input`. Stops at the first rejected document.
pub fn load_engine(engine: &mut SearchEngine, input: &Path) -> Result<usize> {
    let mut added = 0;
    let files = input_files(input).context("collecting input documents")?;
    for file in files {
        for doc in read_docs(&file)? {
            engine
                .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
                .with_context(|| format!("adding document {} from {}", doc.id, file.display()))?;
            added += 1;
        }
    }
    tracing::info!(documents = added, input = %input.display(), "loaded documents");
    Ok(added)
}
