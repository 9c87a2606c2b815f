use atelier::{
    compose_prompt, logger, BackgroundTheme, DepthOfField, Eyewear, GeminiConfig, GenerationMode,
    ReferenceImage, ReferenceRole, ReferenceSet, Resolution, Studio, StyleOptions,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(
        logger::LoggerConfig::development().with_level(log::LevelFilter::Debug),
    )?;

    log::info!("🔍 Checking Gemini environment...");

    match env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
        Ok(key) => {
            log::info!("✅ Gemini API key found in environment");
            log::debug!("API key starts with: {}...", &key[..5.min(key.len())]);
        }
        Err(_) => {
            log::error!("❌ No GEMINI_API_KEY in environment, generation calls will fail");
        }
    }

    let config = GeminiConfig::from_env();
    log::info!("⚙️  Image model: {}", config.image_model());
    log::info!("⚙️  Multimodal model: {}", config.multimodal_model());

    log::info!("🔄 Creating studio...");
    let studio = match Studio::gemini(config) {
        Ok(studio) => {
            log::info!("✅ Studio initialized successfully");
            studio
        }
        Err(e) => {
            log::error!("❌ Failed to initialize studio: {}", e);
            return Err(e.into());
        }
    };

    // Test 1: prompt composition
    log::info!("🧪 Testing prompt composition...");
    let options = StyleOptions::new()
        .with_resolution(Resolution::High)
        .with_depth_of_field(DepthOfField::Shallow)
        .with_background(BackgroundTheme::Beach)
        .with_eyewear(Eyewear::Aviator);
    let prompt = compose_prompt(
        "A model wearing a flowing red summer dress",
        &options,
        false,
    );
    log::info!("📝 Composed prompt: {}", prompt);

    // Test 2: text-to-image generation
    log::info!("🎨 Testing text-to-image generation...");
    let timer = logger::Timer::new("text-to-image");
    match studio
        .dispatch(GenerationMode::TextToImage, &ReferenceSet::new(), &prompt, "3:4")
        .await
    {
        Ok(uri) => {
            timer.stop();
            log::info!("✅ Text-to-image generation successful!");
            log::info!("📏 Data URI length: {} characters", uri.len());
            save_data_uri(&uri, "text_to_image")?;
        }
        Err(e) => {
            log::error!("❌ Text-to-image generation failed: {}", e);
            log::warn!("💡 Check your API key and model availability");
        }
    }

    // Test 3: virtual try-on, when reference images are supplied
    let model_path = env::var("ATELIER_MODEL_IMAGE").ok();
    let product_path = env::var("ATELIER_PRODUCT_IMAGE").ok();

    if let (Some(model_path), Some(product_path)) = (model_path, product_path) {
        log::info!("👗 Testing virtual try-on...");
        let refs = ReferenceSet::new()
            .with_face(ReferenceImage::from_path(ReferenceRole::Model, &model_path)?)
            .with_product(ReferenceImage::from_path(
                ReferenceRole::Product,
                &product_path,
            )?);

        let timer = logger::Timer::new("try-on");
        match studio
            .dispatch(GenerationMode::TryOn, &refs, &prompt, "3:4")
            .await
        {
            Ok(uri) => {
                timer.stop();
                log::info!("✅ Virtual try-on successful!");
                save_data_uri(&uri, "try_on")?;
            }
            Err(e) => {
                log::error!("❌ Virtual try-on failed: {}", e);
            }
        }
    } else {
        log::info!(
            "ℹ️  Set ATELIER_MODEL_IMAGE and ATELIER_PRODUCT_IMAGE to also exercise try-on"
        );
    }

    log::info!("🎉 All tests completed!");
    Ok(())
}

fn save_data_uri(uri: &str, label: &str) -> Result<(), Box<dyn std::error::Error>> {
    let payload = uri
        .strip_prefix("data:image/png;base64,")
        .ok_or("unexpected data URI format")?;

    let filename = format!("atelier_{}_{}.png", label, chrono::Utc::now().timestamp());
    let image_bytes = STANDARD.decode(payload)?;
    fs::write(&filename, image_bytes)?;
    log::info!("💾 Image saved to: {}", filename);
    Ok(())
}
