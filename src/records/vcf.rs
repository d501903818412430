use super::breakend::parse_breakend_alt;
use super::{Locus, Position, RecordError, SvType, VariantRecord};

const CHROM: usize = 0;
const POS: usize = 1;
const ALT: usize = 4;
const INFO: usize = 7;
/// Mandatory VCF columns, `CHROM` through `INFO`.
pub const VCF_MIN_FIELDS: usize = 8;

/// One VCF data line.
///
/// Coordinates are parsed when the record is read. Fields are kept as
/// written so an untouched record serialises byte-for-byte; only `INFO` is
/// rebuilt, and only when an annotation is set.
#[derive(Debug, Clone, PartialEq)]
pub struct VcfRecord {
    fields: Vec<String>,
    locus: Locus,
    end: Option<Position>,
    svtype: Option<SvType>,
    remotes: Vec<Locus>,
}

impl VcfRecord {
    /// Parse a tab-separated VCF data line (without trailing newline).
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
        if fields.len() < VCF_MIN_FIELDS {
            return Err(RecordError::TooFewFields {
                found: fields.len(),
                expected: VCF_MIN_FIELDS,
                line: line.to_string(),
            });
        }

        let pos: Position = fields[POS]
            .parse()
            .map_err(|_| RecordError::InvalidPosition(fields[POS].clone()))?;
        let locus = Locus::new(fields[CHROM].as_str(), pos);

        let svtype = info_value(&fields[INFO], "SVTYPE").map(SvType::from);
        let end = info_value(&fields[INFO], "END")
            .map(|value| {
                value
                    .parse::<Position>()
                    .map_err(|_| RecordError::InvalidEnd(value.to_string()))
            })
            .transpose()?;

        let mut remotes = Vec::new();
        if svtype.as_ref().is_some_and(SvType::is_breakend) {
            for alt in fields[ALT].split(',') {
                if let Some(remote) = parse_breakend_alt(alt)? {
                    remotes.push(remote);
                }
            }
        }

        Ok(Self {
            fields,
            locus,
            end,
            svtype,
            remotes,
        })
    }

    /// Serialise back to a VCF data line (no newline).
    pub fn to_line(&self) -> String {
        self.fields.join("\t")
    }

    /// Raw INFO column.
    pub fn info(&self) -> &str {
        &self.fields[INFO]
    }

    /// Value of an INFO key; flags yield an empty string.
    pub fn info_value(&self, key: &str) -> Option<&str> {
        info_value(&self.fields[INFO], key)
    }

    /// Set or replace an INFO entry.
    pub fn set_info(&mut self, key: &str, value: &str) {
        let entry = format!("{key}={value}");
        let info = &self.fields[INFO];
        let mut entries: Vec<String> = if info.is_empty() || info == "." {
            Vec::new()
        } else {
            info.split(';').map(str::to_string).collect()
        };

        match entries.iter_mut().find(|existing| entry_key(existing) == key) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        self.fields[INFO] = entries.join(";");
    }
}

fn entry_key(entry: &str) -> &str {
    entry.split_once('=').map_or(entry, |(key, _)| key)
}

fn info_value<'a>(info: &'a str, key: &str) -> Option<&'a str> {
    info.split(';').find_map(|entry| match entry.split_once('=') {
        Some((k, v)) if k == key => Some(v),
        None if entry == key => Some(""),
        _ => None,
    })
}

impl VariantRecord for VcfRecord {
    fn structural_type(&self) -> Option<SvType> {
        self.svtype.clone()
    }

    fn primary_locus(&self) -> Locus {
        self.locus.clone()
    }

    fn end_position(&self) -> Option<Position> {
        self.end
    }

    fn breakend_remote_loci(&self) -> Vec<Locus> {
        self.remotes.clone()
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.info_value(key)
    }

    fn set_annotation(&mut self, key: &str, value: &str) {
        self.set_info(key, value);
    }
}
