use clap::{Parser, ValueEnum};
use heightfield::{
    Channel, IndexWidth, IndexWidthPolicy, SceneSettings, SphereMethod, Topology, ViewParams,
};
use std::path::PathBuf;

/// Index storage requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IndexWidthArg {
    /// 16-bit when every index fits, else 32-bit.
    Auto,
    U16,
    U32,
}

impl std::fmt::Display for IndexWidthArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IndexWidthArg::Auto => "auto",
            IndexWidthArg::U16 => "u16",
            IndexWidthArg::U32 => "u32",
        };

        f.write_str(s)
    }
}

impl From<IndexWidthArg> for IndexWidthPolicy {
    fn from(arg: IndexWidthArg) -> Self {
        match arg {
            IndexWidthArg::Auto => IndexWidthPolicy::Auto,
            IndexWidthArg::U16 => IndexWidthPolicy::Fixed(IndexWidth::U16),
            IndexWidthArg::U32 => IndexWidthPolicy::Fixed(IndexWidth::U32),
        }
    }
}

/// `heightfield-viewer` - renders one color channel of an image as terrain.
///
/// Drag with the left mouse button to orbit. The side panel switches the
/// image, the primitive topology and the elevation channel.
#[derive(Parser, Debug, Clone)]
#[command(name = "heightfield-viewer", version, about, long_about = None)]
pub struct Config {
    /// Image file to open, or a directory whose images are offered in the
    /// panel (png, jpg, jpeg, gif, webp, bmp).
    #[arg(long, env = "HEIGHTFIELD_IMAGE", default_value = "images")]
    pub image: PathBuf,

    /// Initial primitive topology: triangle-strip, triangles, lines or points.
    #[arg(long, default_value_t = Topology::TriangleStrip)]
    pub topology: Topology,

    /// Initial elevation channel: red, green or blue.
    #[arg(long, default_value_t = Channel::Red)]
    pub channel: Channel,

    /// Index buffer width. Forcing u16 on a grid above 65536 vertices is
    /// rejected.
    #[arg(long, value_enum, default_value_t = IndexWidthArg::Auto)]
    pub index_width: IndexWidthArg,

    /// Bounding sphere seeding: extremal or farthest-pair.
    #[arg(long, default_value_t = SphereMethod::ExtremalPairs)]
    pub sphere_method: SphereMethod,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 45.0)]
    pub fov_deg: f32,

    #[arg(long, default_value_t = 1.0)]
    pub near: f32,

    #[arg(long, default_value_t = 10_000.0)]
    pub far: f32,

    /// Orbit sensitivity.
    #[arg(long, default_value_t = 0.5)]
    pub drag_degrees_per_px: f32,
}

impl Config {
    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            topology: self.topology,
            channel: self.channel,
            index_width: self.index_width.into(),
            sphere_method: self.sphere_method,
            // wgpu always accepts Uint32 index buffers.
            wide_indices: true,
        }
    }

    pub fn view_params(&self) -> ViewParams {
        ViewParams {
            fovy_deg: self.fov_deg,
            near: self.near,
            far: self.far,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["heightfield-viewer"]).unwrap();
        assert_eq!(cfg.topology, Topology::TriangleStrip);
        assert_eq!(cfg.channel, Channel::Red);
        assert_eq!(cfg.index_width, IndexWidthArg::Auto);
        assert_eq!(cfg.view_params(), ViewParams::default());
        assert_eq!(cfg.scene_settings(), SceneSettings::default());
    }

    #[test]
    fn selectors_parse_through_the_core() {
        let cfg = Config::try_parse_from([
            "heightfield-viewer",
            "--topology",
            "lines",
            "--channel",
            "blue",
            "--index-width",
            "u16",
            "--sphere-method",
            "farthest-pair",
        ])
        .unwrap();
        assert_eq!(cfg.topology, Topology::Lines);
        assert_eq!(cfg.channel, Channel::Blue);
        assert_eq!(
            cfg.scene_settings().index_width,
            IndexWidthPolicy::Fixed(IndexWidth::U16)
        );
        assert_eq!(cfg.sphere_method, SphereMethod::FarthestPair);

        assert!(Config::try_parse_from(["heightfield-viewer", "--channel", "alpha"]).is_err());
        assert!(Config::try_parse_from(["heightfield-viewer", "--topology", "quads"]).is_err());
    }
}
