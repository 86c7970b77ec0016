use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata for `forkful --version`
    ShadowBuilder::builder()
        .build()
        .expect("failed to generate build metadata");
}
