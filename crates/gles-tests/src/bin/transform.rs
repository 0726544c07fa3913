use gles_tests::uniform_transform::{self, UniformTransformTest};

fn main() {
    gles_tests::run::<UniformTransformTest>(uniform_transform::config());
}
