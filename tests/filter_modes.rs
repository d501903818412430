#[path = "common/mod.rs"]
mod common;

use std::io::Cursor;
use std::sync::Arc;

use common::{scratch_file, CALLS_VCF, REGIONS};
use svfilter::plugin::{HookError, HookRegistry, SupportFilter};
use svfilter::records::RecordError;
use svfilter::regions::Interval;
use svfilter::{FilterConfig, InputFormat, IntervalIndex, PipelineError, SvFilter};

const HEADER: &str = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

fn data_lines(output: &str) -> Vec<&str> {
    output.lines().filter(|line| !line.starts_with('#')).collect()
}

#[test]
fn sample_tag_alone_changes_only_info() {
    let filter = SvFilter::passthrough(FilterConfig::new(InputFormat::Vcf).with_sample("S9"));
    let mut out = Vec::new();
    filter.run(Cursor::new(CALLS_VCF), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    let input = data_lines(CALLS_VCF);
    let tagged = data_lines(&output);
    assert_eq!(input.len(), tagged.len());
    for (before, after) in input.iter().zip(&tagged) {
        assert_eq!(format!("{before};sample=S9"), *after);
    }
    assert!(!output.contains("ID=hits"));
}

#[test]
fn malformed_breakend_stops_after_earlier_records() {
    let input = format!(
        "{HEADER}chr1\t100\tok\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=200\n\
         chr1\t500\tbad\tN\tN[notachrom[\t.\tPASS\tSVTYPE=BND\n\
         chr1\t900\tlate\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=950\n"
    );
    let index = IntervalIndex::build([("chr1", Interval::new(1, 1000, Some(Arc::from("all"))))]);
    let filter = SvFilter::new(
        FilterConfig::new(InputFormat::Vcf),
        Some(Arc::new(index)),
        HookRegistry::with_builtins().resolve(None).unwrap(),
    );

    let mut out = Vec::new();
    let err = filter.run(Cursor::new(input), &mut out).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Record(RecordError::MalformedBreakend(_))
    ));

    let output = String::from_utf8(out).unwrap();
    let ids: Vec<&str> = data_lines(&output)
        .iter()
        .map(|line| line.split('\t').nth(2).unwrap())
        .collect();
    assert_eq!(ids, ["ok"]);
}

#[test]
fn hit_list_is_capped() {
    let index = IntervalIndex::build(
        (0..10_005u64).map(|i| ("chr1", Interval::new(i + 1, 20_000, Some(Arc::from(format!("r{i}")))))),
    );
    let filter = SvFilter::new(
        FilterConfig::new(InputFormat::Vcf),
        Some(Arc::new(index)),
        HookRegistry::with_builtins().resolve(None).unwrap(),
    );
    let input = format!("{HEADER}chr1\t1\tbig\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=30000\n");

    let mut out = Vec::new();
    filter.run(Cursor::new(input), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();
    let record = data_lines(&output)[0];
    let hits = record
        .rsplit('\t')
        .next()
        .and_then(|info| info.split(';').find_map(|kv| kv.strip_prefix("hits=")))
        .unwrap();

    let (listed, rest) = hits.split_once(" + ").unwrap();
    assert_eq!(rest, "5 more");
    assert_eq!(listed.split(',').count(), 10_000);
}

#[test]
fn support_hook_runs_after_coordinate_stage() {
    let input = format!(
        "{HEADER}chr1\t100\tstrong\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=200;SU=30;PE=12;SR=9\n\
         chr1\t110\tweak\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=210;SU=4;PE=2;SR=2\n\
         chr9\t100\toutside\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=200;SU=30;PE=12;SR=9\n"
    );
    let regions = scratch_file("support_regions.tsv", REGIONS);
    let config = FilterConfig::new(InputFormat::Vcf)
        .with_regions(regions)
        .with_custom("support");
    let filter = SvFilter::from_config(config, &HookRegistry::with_builtins()).unwrap();

    let mut out = Vec::new();
    let stats = filter.run(Cursor::new(input), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(stats.records_in, 3);
    assert_eq!(stats.records_out, 1);
    assert_eq!(
        data_lines(&output),
        ["chr1\t100\tstrong\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=200;SU=30;PE=12;SR=9;hits=exonA"]
    );
}

#[test]
fn unknown_custom_filter_is_rejected() {
    let config = FilterConfig::new(InputFormat::Vcf).with_custom("missing");
    let err = SvFilter::from_config(config, &HookRegistry::with_builtins()).unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn registered_hook_is_selectable() {
    let mut registry = HookRegistry::new();
    registry.register(SupportFilter {
        min_support: 0,
        min_paired_end: 0,
        min_split_read: 0,
    });
    let config = FilterConfig::new(InputFormat::Vcf).with_custom("support");
    let filter = SvFilter::from_config(config, &registry).unwrap();

    let input = format!("{HEADER}chr1\t1\tv\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=5;SU=1;PE=1;SR=1\n");
    let mut out = Vec::new();
    let stats = filter.run(Cursor::new(input), &mut out).unwrap();
    assert_eq!(stats.records_out, 1);
}

#[test]
fn support_hook_stops_run_on_missing_count() {
    let input = format!(
        "{HEADER}chr1\t1\tfirst\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=5;SU=30;PE=12;SR=9\n\
         chr1\t9\tbare\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=15\n"
    );
    let config = FilterConfig::new(InputFormat::Vcf).with_custom("support");
    let filter = SvFilter::from_config(config, &HookRegistry::with_builtins()).unwrap();

    let mut out = Vec::new();
    let err = filter.run(Cursor::new(input), &mut out).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Hook(HookError::Failed { hook: "support", .. })
    ));
    let output = String::from_utf8(out).unwrap();
    assert_eq!(data_lines(&output).len(), 1);
}
