#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("SVFILTER_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set SVFILTER_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Write `contents` to a per-process scratch file and return its path.
pub fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("svfilter-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch directory");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write scratch file");
    path
}

pub const REGIONS: &str = "\
chr1\t150\t160\texonA
chr1\t650\t720\texonB
chr2\t290\t310\texonC
chr3\t1000\t2000
";

pub const CALLS_VCF: &str = "\
##fileformat=VCFv4.2
##INFO=<ID=SVTYPE,Number=1,Type=String,Description=\"Type of structural variant\">
##INFO=<ID=END,Number=1,Type=Integer,Description=\"End position of the variant\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t100\tdel1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=200
chr1\t300\tdup1\tN\t<DUP>\t.\tPASS\tSVTYPE=DUP;END=400
chr1\t500\tbnd1\tN\tN[chr1:700[\t.\tPASS\tSVTYPE=BND
chr1\t500\tbnd2\tN\tN[chr2:300[\t.\tPASS\tSVTYPE=BND
chr3\t1500\tins1\tN\t<INS>\t.\tPASS\tSVTYPE=INS
chr4\t10\tinv1\tN\t<INV>\t.\tPASS\tSVTYPE=INV;END=90
";

/// Like [`scratch_file`], but BGZF-compressed.
pub fn bgzip_scratch_file(name: &str, contents: &str) -> PathBuf {
    use std::io::Write;

    let path = scratch_file(name, "");
    let mut writer = rust_htslib::bgzf::Writer::from_path(&path).expect("open bgzf writer");
    writer.write_all(contents.as_bytes()).expect("write bgzf data");
    writer.flush().expect("flush bgzf data");
    drop(writer);
    path
}
