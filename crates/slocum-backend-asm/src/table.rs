//! Pattern tables and per-channel sequences.
//!
//! Every compiled channel becomes one table entry. Non-attenuated channels go
//! to the high-volume table (indices from 0), attenuated channels to the
//! low-volume table (indices from 128). After appending, the table's counter
//! advances and the advanced value is the byte written to the physical
//! channel's sequence.

use serde::Serialize;
use slocum_song::{Pattern, CHANNELS_PER_PATTERN};

use crate::block::{BlockCache, BlockRef};
use crate::error::AssembleError;
use crate::note::NoteEncoder;
use crate::pattern::{compile_channel, CompiledChannel, BYTE_DECL, GROUPS_PER_PATTERN};

/// First index of the high-volume table.
pub const HIGH_TABLE_BASE: u16 = 0;

/// First index of the low-volume table.
pub const LOW_TABLE_BASE: u16 = 128;

/// Destination table of a compiled channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    High,
    Low,
}

impl TableKind {
    /// Selects the table for an attenuation flag.
    pub fn for_attenuation(attenuate: bool) -> Self {
        if attenuate {
            TableKind::Low
        } else {
            TableKind::High
        }
    }

    pub fn base(&self) -> u16 {
        match self {
            TableKind::High => HIGH_TABLE_BASE,
            TableKind::Low => LOW_TABLE_BASE,
        }
    }

    /// Entries that fit before the advanced counter leaves the table's range.
    ///
    /// High sequence bytes run 1..=128 and low ones 129..=255.
    pub fn capacity(&self) -> usize {
        match self {
            TableKind::High => (LOW_TABLE_BASE - HIGH_TABLE_BASE) as usize,
            TableKind::Low => (u8::MAX as u16 - LOW_TABLE_BASE) as usize,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::High => "high",
            TableKind::Low => "low",
        }
    }
}

/// One entry of a pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    /// Table index the entry was stored at.
    pub index: u16,
    pub blocks: [BlockRef; GROUPS_PER_PATTERN],
}

/// One of the two pattern tables.
#[derive(Debug, Clone)]
pub struct PatternTable {
    kind: TableKind,
    entries: Vec<TableEntry>,
}

impl PatternTable {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Appends an entry and returns the advanced counter.
    fn push(&mut self, blocks: [BlockRef; GROUPS_PER_PATTERN]) -> Result<u16, AssembleError> {
        if self.entries.len() >= self.kind.capacity() {
            return Err(AssembleError::TableFull {
                table: self.kind.as_str(),
                capacity: self.kind.capacity(),
            });
        }

        let index = self.kind.base() + self.entries.len() as u16;
        self.entries.push(TableEntry { index, blocks });
        Ok(index + 1)
    }

    fn render(&self, labels: &[String]) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let refs: Vec<&str> = entry
                .blocks
                .iter()
                .map(|b| labels[b.position()].as_str())
                .collect();
            out.push_str("    word ");
            out.push_str(&refs.join(", "));
            out.push_str(" ; ");
            out.push_str(&entry.index.to_string());
            out.push('\n');
        }
        out
    }
}

/// Text fragments handed to the document template.
///
/// Field names follow the keys the Sequencer Kit template expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternTables {
    /// Labeled block declarations in first-occurrence order.
    pub patterns: String,
    /// High-volume table lines.
    #[serde(rename = "patternArrayH")]
    pub pattern_array_h: String,
    /// Low-volume table lines.
    #[serde(rename = "patternArrayL")]
    pub pattern_array_l: String,
    #[serde(rename = "channel1sequence")]
    pub channel1_sequence: String,
    #[serde(rename = "channel2sequence")]
    pub channel2_sequence: String,
}

/// Routes compiled channels into the two tables and records the sequences.
#[derive(Debug, Clone)]
pub struct TableAssembler {
    high: PatternTable,
    low: PatternTable,
    sequences: [Vec<u16>; CHANNELS_PER_PATTERN],
}

impl Default for TableAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TableAssembler {
    pub fn new() -> Self {
        Self {
            high: PatternTable::new(TableKind::High),
            low: PatternTable::new(TableKind::Low),
            sequences: Default::default(),
        }
    }

    /// Adds the compiled channel at `channel_index` of the current pattern and
    /// returns the sequence byte recorded for it.
    pub fn add(
        &mut self,
        channel_index: usize,
        compiled: &CompiledChannel,
    ) -> Result<u16, AssembleError> {
        if channel_index >= CHANNELS_PER_PATTERN {
            return Err(AssembleError::ChannelOutOfRange {
                channel: channel_index,
            });
        }

        let table = match TableKind::for_attenuation(compiled.attenuate) {
            TableKind::High => &mut self.high,
            TableKind::Low => &mut self.low,
        };
        let sequence_value = table.push(compiled.blocks)?;
        self.sequences[channel_index].push(sequence_value);
        Ok(sequence_value)
    }

    pub fn high(&self) -> &PatternTable {
        &self.high
    }

    pub fn low(&self) -> &PatternTable {
        &self.low
    }

    /// Sequence bytes of a physical channel (0 or 1).
    pub fn sequence(&self, channel_index: usize) -> &[u16] {
        self.sequences
            .get(channel_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Labels every block and renders all table fragments.
    pub fn finish(&self, cache: &BlockCache) -> PatternTables {
        let labels = cache.labels();

        let mut patterns = String::new();
        for (block, label) in cache.iter().zip(&labels) {
            patterns.push_str(label);
            patterns.push('\n');
            patterns.push_str(&block.text);
        }

        PatternTables {
            patterns,
            pattern_array_h: self.high.render(&labels),
            pattern_array_l: self.low.render(&labels),
            channel1_sequence: render_sequence(&self.sequences[0]),
            channel2_sequence: render_sequence(&self.sequences[1]),
        }
    }
}

fn render_sequence(values: &[u16]) -> String {
    let mut out = String::new();
    for value in values {
        out.push_str(BYTE_DECL);
        out.push_str(&value.to_string());
        out.push('\n');
    }
    out
}

/// Compiles every pattern of a song into table fragments.
///
/// Patterns are traversed in song order, channels in physical order. The block
/// cache and counters are created here and dropped on return.
pub fn compile_patterns<E: NoteEncoder + ?Sized>(
    patterns: &[Pattern],
    tuning: u8,
    encoder: &E,
) -> Result<PatternTables, AssembleError> {
    let mut cache = BlockCache::new();
    let mut assembler = TableAssembler::new();

    for (pattern_index, pattern) in patterns.iter().enumerate() {
        if pattern.channels.len() != CHANNELS_PER_PATTERN {
            return Err(AssembleError::WrongChannelCount {
                pattern: pattern_index,
                found: pattern.channels.len(),
            });
        }
        for (channel_index, channel) in pattern.channels.iter().enumerate() {
            let compiled = compile_channel(channel, pattern.steps, tuning, encoder, &mut cache)?;
            assembler.add(channel_index, &compiled)?;
        }
    }

    tracing::debug!(
        patterns = patterns.len(),
        blocks = cache.len(),
        high_entries = assembler.high().entries().len(),
        low_entries = assembler.low().entries().len(),
        "compiled pattern tables"
    );

    Ok(assembler.finish(&cache))
}
