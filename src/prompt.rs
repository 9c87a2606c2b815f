//! Prompt composition: folds style options into fixed phrase fragments
//! appended to the user's base prompt.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Standard,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthOfField {
    #[default]
    Shallow,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundTheme {
    #[default]
    Studio,
    Urban,
    Nature,
    Luxury,
    Beach,
    Cafe,
}

impl BackgroundTheme {
    /// Studio is the default sentinel and contributes no clause.
    pub fn phrase(&self) -> Option<&'static str> {
        match self {
            BackgroundTheme::Studio => None,
            BackgroundTheme::Urban => Some("urban street city background, modern city vibe"),
            BackgroundTheme::Nature => Some("nature background, park with trees and greenery"),
            BackgroundTheme::Luxury => {
                Some("luxury interior hotel lobby background, elegant atmosphere")
            }
            BackgroundTheme::Beach => Some("tropical beach background, ocean view, sunlight"),
            BackgroundTheme::Cafe => Some("cozy cafe interior background, coffee shop vibe"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eyewear {
    #[default]
    None,
    Aviator,
    Wayfarer,
    Round,
    CatEye,
    Sport,
    Rimless,
}

impl Eyewear {
    pub fn phrase(&self) -> Option<&'static str> {
        match self {
            Eyewear::None => None,
            Eyewear::Aviator => Some("aviator sunglasses"),
            Eyewear::Wayfarer => Some("wayfarer sunglasses"),
            Eyewear::Round => Some("round wireframe glasses"),
            Eyewear::CatEye => Some("fashionable cat-eye glasses"),
            Eyewear::Sport => Some("sport sunglasses"),
            Eyewear::Rimless => Some("modern rimless glasses"),
        }
    }
}

/// One immutable bundle of every style toggle the studio exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleOptions {
    pub resolution: Resolution,
    pub depth_of_field: DepthOfField,
    pub background: BackgroundTheme,
    pub eyewear: Eyewear,
}

impl StyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_depth_of_field(mut self, depth_of_field: DepthOfField) -> Self {
        self.depth_of_field = depth_of_field;
        self
    }

    pub fn with_background(mut self, background: BackgroundTheme) -> Self {
        self.background = background;
        self
    }

    pub fn with_eyewear(mut self, eyewear: Eyewear) -> Self {
        self.eyewear = eyewear;
        self
    }
}

/// Appends clauses to `base` in a fixed order: resolution, depth of
/// field, background theme, eyewear. The background clause is suppressed
/// when an explicit background reference image is present, since that
/// image overrides any theme text.
pub fn compose_prompt(base: &str, options: &StyleOptions, has_background_image: bool) -> String {
    let mut prompt = String::from(base);

    match options.resolution {
        Resolution::High => prompt.push_str(
            ", 4k ultra hd resolution, highly detailed, sharp focus, professional photography",
        ),
        Resolution::Standard => prompt.push_str(", high quality, professional lighting"),
    }

    match options.depth_of_field {
        DepthOfField::Shallow => prompt
            .push_str(", bokeh background, shallow depth of field, blurred background, focus on subject"),
        DepthOfField::Deep => prompt
            .push_str(", deep depth of field, sharp background, everything in focus, f/8 aperture"),
    }

    if !has_background_image {
        if let Some(phrase) = options.background.phrase() {
            prompt.push_str(", ");
            prompt.push_str(phrase);
        }
    }

    if let Some(phrase) = options.eyewear.phrase() {
        prompt.push_str(", wearing ");
        prompt.push_str(phrase);
    }

    prompt
}
