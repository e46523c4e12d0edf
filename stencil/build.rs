fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _shadow = shadow_rs::ShadowBuilder::builder().build()?;
    Ok(())
}
