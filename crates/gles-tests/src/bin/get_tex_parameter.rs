use gles_tests::texture_params::{self, TextureParamsTest};

fn main() {
    gles_tests::run::<TextureParamsTest>(texture_params::config());
}
