use crate::diagram::model::Diagram;
use crate::foundation::error::{MorphcastError, MorphcastResult};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;

/// One step of a narrated process: title, narration script and diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct Stage {
    /// 1-based position in the process.
    pub index: u32,
    /// Short title.
    pub title: String,
    /// Narration text, one or more sentences.
    pub script: String,
    /// Parsed illustration.
    pub diagram: Diagram,
}

impl Stage {
    /// Build a stage, parsing its SVG diagram.
    pub fn new(
        index: u32,
        title: impl Into<String>,
        script: impl Into<String>,
        svg: &str,
    ) -> MorphcastResult<Self> {
        let diagram = Diagram::parse(svg).map_err(|e| match e {
            MorphcastError::Diagram(msg) => {
                MorphcastError::diagram(format!("stage {index}: {msg}"))
            }
            MorphcastError::Color(msg) => MorphcastError::color(format!("stage {index}: {msg}")),
            other => other,
        })?;
        Ok(Self {
            index,
            title: title.into(),
            script: script.into(),
            diagram,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StageDef {
    stage_index: u32,
    title: String,
    script: String,
    svg: String,
}

#[derive(Deserialize)]
struct StageDocument {
    stages: Vec<StageDef>,
}

/// Parse a stage document (`{"stages": [...]}`) into stages ordered by `stageIndex`.
///
/// Every diagram is parsed up front; the first malformed one fails the whole document.
pub fn load_stages_json(json: &str) -> MorphcastResult<Vec<Stage>> {
    let doc: StageDocument = serde_json::from_str(json)?;
    stages_from_document(doc)
}

/// [`load_stages_json`] over a reader.
pub fn load_stages_reader(reader: impl Read) -> MorphcastResult<Vec<Stage>> {
    let doc: StageDocument = serde_json::from_reader(reader)?;
    stages_from_document(doc)
}

fn stages_from_document(doc: StageDocument) -> MorphcastResult<Vec<Stage>> {
    if doc.stages.is_empty() {
        return Err(MorphcastError::validation(
            "stage document must contain at least one stage",
        ));
    }

    let mut seen = BTreeSet::new();
    for def in &doc.stages {
        if !seen.insert(def.stage_index) {
            return Err(MorphcastError::validation(format!(
                "duplicate stageIndex {}",
                def.stage_index
            )));
        }
    }

    let mut stages = doc
        .stages
        .into_iter()
        .map(|def| Stage::new(def.stage_index, def.title, def.script, &def.svg))
        .collect::<MorphcastResult<Vec<_>>>()?;
    stages.sort_by_key(|s| s.index);
    tracing::debug!(count = stages.len(), "loaded stages");
    Ok(stages)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
