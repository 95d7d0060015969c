//! Collection of `<script>` payloads, keeping each block's declared type.

use crate::extractor::scanner::{Attributes, MarkupSink, scan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
    /// Raw `type` attribute as written in the page, if any.
    pub declared_type: Option<String>,
    /// Trimmed script body, character references untouched.
    pub body: String,
}

#[derive(Debug, Default)]
pub struct ScriptCollector {
    blocks: Vec<ScriptBlock>,
    in_script: bool,
    current_type: Option<String>,
    buffer: String,
}

impl MarkupSink for ScriptCollector {
    fn on_start(&mut self, tag: &str, attrs: &Attributes) {
        if tag == "script" {
            self.in_script = true;
            self.current_type = attrs.get("type").map(str::to_string);
            self.buffer.clear();
        }
    }

    fn on_end(&mut self, tag: &str) {
        if tag == "script" && self.in_script {
            self.blocks.push(ScriptBlock {
                declared_type: self.current_type.take(),
                body: self.buffer.trim().to_string(),
            });
            self.in_script = false;
            self.buffer.clear();
        }
    }

    fn on_text(&mut self, text: &str) {
        if self.in_script {
            self.buffer.push_str(text);
        }
    }
}

impl ScriptCollector {
    pub fn into_blocks(self) -> Vec<ScriptBlock> {
        self.blocks
    }
}

/// All script blocks of `html`, in document order.
pub fn collect_scripts(html: &str) -> Vec<ScriptBlock> {
    let mut collector = ScriptCollector::default();
    scan(html, &mut collector);
    collector.into_blocks()
}
