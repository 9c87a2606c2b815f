//! Virtual try-on: put a garment photo on a model photo.
//!
//! Usage: cargo run --example tryon -- <model.jpg> <product.png>

use atelier::{
    logger, GeminiConfig, GenerationMode, ReferenceImage, ReferenceRole, ReferenceSet, Studio,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logger::init()?;

    let mut args = env::args().skip(1);
    let model_path = args.next().ok_or("usage: tryon <model> <product>")?;
    let product_path = args.next().ok_or("usage: tryon <model> <product>")?;

    let refs = ReferenceSet::new()
        .with_face(ReferenceImage::from_path(ReferenceRole::Model, &model_path)?)
        .with_product(ReferenceImage::from_path(
            ReferenceRole::Product,
            &product_path,
        )?);

    let studio = Studio::gemini(GeminiConfig::from_env())?;
    let uri = studio
        .dispatch(GenerationMode::TryOn, &refs, "", "3:4")
        .await?;

    let payload = uri
        .strip_prefix("data:image/png;base64,")
        .ok_or("unexpected data URI format")?;
    fs::write("tryon_result.png", STANDARD.decode(payload)?)?;
    log::info!("💾 Result saved to tryon_result.png");

    Ok(())
}
