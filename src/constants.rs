/// Fixed paths and parameters for the asset pipelines
///
/// Nothing here is runtime-configurable: both pipelines run against the
/// checked-in project layout and a fixed output contract.

pub mod paths {
    /// Master icon the whole icon pipeline is derived from
    pub const SOURCE_ICON: &str =
        "ios/Stillwave/Images.xcassets/AppIcon.appiconset/Icon-iOS-Default-1024x1024@1x.png";

    /// Xcode icon set directory (resized icons + Contents.json)
    pub const APPICONSET_DIR: &str = "ios/Stillwave/Images.xcassets/AppIcon.appiconset";

    /// Generic asset directory (icon.png, splash-icon.png)
    pub const ASSETS_DIR: &str = "assets";
}

pub mod icon {
    /// Opaque backdrop composited under transparent sources
    /// Matches the app's dark theme background
    pub const BACKGROUND: [u8; 3] = [18, 18, 18];

    /// Square dimension of the generic assets/icon.png copy
    pub const GENERIC_ICON_SIZE: u32 = 1024;
}

pub mod splash {
    /// Splash canvas is square and fully transparent outside the composite
    pub const CANVAS_SIZE: u32 = 1200;

    /// Edge length of the pasted icon
    pub const ICON_SIZE: u32 = 400;

    /// Top-left offset of the pasted icon on the canvas
    pub const ICON_OFFSET: (i64, i64) = (400, 300);

    /// Corner rounding radius applied to the pasted icon
    pub const CORNER_RADIUS: u32 = 90;

    /// Label rendered beneath the icon
    pub const LABEL: &str = "STILLWAVE";

    /// Label height in pixels
    pub const LABEL_SIZE: f32 = 80.0;

    /// Vertical position of the label's top edge
    pub const LABEL_TOP: i32 = 750;

    /// Candidate system font faces, tried in order.
    /// Helvetica first (macOS build machines), then common Linux faces.
    pub const FONT_PATHS: &[&str] = &[
        "/System/Library/Fonts/Helvetica.ttc",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ];
}

pub mod audio {
    /// CD-quality sample rate shared by all tracks
    pub const SAMPLE_RATE: u32 = 44_100;

    /// Loop length: 15 minutes per track
    pub const DURATION_SECS: u32 = 900;

    /// Half full scale, leaves headroom when tracks are mixed downstream
    pub const AMPLITUDE: f64 = 0.5;
}
