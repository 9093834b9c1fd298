use crate::error::{KeResult, KeyEvolveError};
use crate::layout::Mapping;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Symbol-pair counts indexed by mapping id: `get(first, second)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCounts {
    size: usize,
    counts: Vec<u64>,
}

impl PairCounts {
    pub fn zeroed(size: usize) -> Self {
        Self {
            size,
            counts: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn get(&self, first: usize, second: usize) -> u64 {
        self.counts[first * self.size + second]
    }

    pub fn set(&mut self, first: usize, second: usize, count: u64) {
        self.counts[first * self.size + second] = count;
    }

    /// Row of counts for pairs starting with `first`.
    #[inline(always)]
    pub fn row(&self, first: usize) -> &[u64] {
        let start = first * self.size;
        &self.counts[start..start + self.size]
    }
}

fn corpus_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader)
}

/// Rebuilds the raw line. Fields split on every space, so a symbol that is itself a space
/// leaves empty fields behind; joining them back keeps the line positional.
fn raw_line(record: &csv::ByteRecord) -> Vec<u8> {
    let mut line = Vec::with_capacity(record.as_slice().len() + record.len());
    for (i, field) in record.iter().enumerate() {
        if i > 0 {
            line.push(b' ');
        }
        line.extend_from_slice(field);
    }
    line
}

/// Reads the leading `N` symbols as ids and returns them with the count bytes after the
/// separating space. `None` if a symbol is not valid UTF-8, lies outside the mapping, or is
/// followed by anything but a space; such lines carry nothing this run can use.
fn symbol_ids<'a, const N: usize>(line: &'a [u8], mapping: &Mapping) -> Option<([u8; N], &'a [u8])> {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text,
        Err(e) => std::str::from_utf8(&line[..e.valid_up_to()]).ok()?,
    };

    let mut ids = [0u8; N];
    let mut chars = text.char_indices();
    for id in ids.iter_mut() {
        *id = mapping.id_of(chars.next()?.1)?;
    }
    let end = chars.next().map_or(text.len(), |(i, _)| i);

    match line.get(end) {
        // Symbols with no count at all; left for the count parser to reject.
        None => Some((ids, &line[end..])),
        Some(b' ') => Some((ids, &line[end + 1..])),
        Some(_) => None,
    }
}

fn parse_count(field: &[u8], line: u64) -> KeResult<u64> {
    let raw = std::str::from_utf8(field).map_err(|e| KeyEvolveError::Corpus {
        line,
        reason: format!("count is not valid UTF-8: {}", e),
    })?;
    if raw.is_empty() {
        return Err(KeyEvolveError::Corpus {
            line,
            reason: "missing count after symbol".to_string(),
        });
    }
    raw.parse::<u64>().map_err(|e| KeyEvolveError::Corpus {
        line,
        reason: format!("invalid count '{}': {}", raw, e),
    })
}

fn load_table<R, const N: usize>(
    reader: R,
    mapping: &Mapping,
    mut store: impl FnMut([u8; N], u64),
) -> KeResult<()>
where
    R: Read,
{
    let mut rdr = corpus_reader(reader);
    let mut loaded = 0usize;
    let mut skipped = 0usize;

    for result in rdr.byte_records() {
        let record = result?;
        let line = raw_line(&record);
        let Some((ids, count)) = symbol_ids::<N>(&line, mapping) else {
            skipped += 1;
            continue;
        };
        let line_no = record.position().map(|p| p.line()).unwrap_or(0);
        store(ids, parse_count(count, line_no)?);
        loaded += 1;
    }

    debug!(
        "   -> Loaded {} {}-gram counts, skipped {} lines.",
        loaded, N, skipped
    );
    Ok(())
}

/// Reads single-symbol counts. Symbols outside `mapping` are ignored; a non-numeric count
/// for a mapped symbol is an error.
pub fn load_monograms<R: Read>(reader: R, mapping: &Mapping) -> KeResult<Vec<u64>> {
    let mut counts = vec![0u64; mapping.len()];
    load_table::<_, 1>(reader, mapping, |[id], count| counts[id as usize] = count)?;
    Ok(counts)
}

/// Reads ordered symbol-pair counts, same rules as [`load_monograms`].
pub fn load_bigrams<R: Read>(reader: R, mapping: &Mapping) -> KeResult<PairCounts> {
    let mut counts = PairCounts::zeroed(mapping.len());
    load_table::<_, 2>(reader, mapping, |[a, b], count| {
        counts.set(a as usize, b as usize, count)
    })?;
    Ok(counts)
}

pub fn load_monograms_from_path<P: AsRef<Path>>(path: P, mapping: &Mapping) -> KeResult<Vec<u64>> {
    debug!("   Loading monograms from: {}", path.as_ref().display());
    load_monograms(File::open(path)?, mapping)
}

pub fn load_bigrams_from_path<P: AsRef<Path>>(path: P, mapping: &Mapping) -> KeResult<PairCounts> {
    debug!("   Loading bigrams from: {}", path.as_ref().display());
    load_bigrams(File::open(path)?, mapping)
}
