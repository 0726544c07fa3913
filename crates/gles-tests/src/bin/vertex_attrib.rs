use gles_tests::vertex_attrib::{self, VertexAttribTest};

fn main() {
    gles_tests::run::<VertexAttribTest>(vertex_attrib::config());
}
