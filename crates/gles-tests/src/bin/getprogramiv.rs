use gles_tests::program_introspection::{self, ProgramIntrospectionTest};

fn main() {
    gles_tests::run::<ProgramIntrospectionTest>(program_introspection::config());
}
