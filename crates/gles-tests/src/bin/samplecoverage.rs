use gles_tests::sample_coverage::{self, SampleCoverageTest};

fn main() {
    gles_tests::run::<SampleCoverageTest>(sample_coverage::config());
}
