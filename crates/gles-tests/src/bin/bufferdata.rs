use gles_tests::buffer_usage::{self, BufferUsageTest};

fn main() {
    gles_tests::run::<BufferUsageTest>(buffer_usage::config());
}
