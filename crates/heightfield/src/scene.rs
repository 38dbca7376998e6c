//! Owns the buffers derived from one image and rebuilds only what an event
//! invalidates.
//!
//! | event            | positions | colors | indices | sphere |
//! |------------------|-----------|--------|---------|--------|
//! | image loaded     | rebuilt   | rebuilt| rebuilt | rebuilt|
//! | topology changed |           |        | rebuilt |        |
//! | channel changed  | rebuilt   |        |         |        |
//!
//! Buffers are shared behind `Arc` and never mutated: a rebuild swaps in a
//! new allocation, so renderers can compare handles to see what moved. Every
//! operation either succeeds completely or leaves the state as it was.

use crate::bounds::{bounding_sphere_with, BoundingSphere, SphereMethod};
use crate::error::Result;
use crate::indices::{build_indices, IndexBuffer, IndexWidth, Topology};
use crate::pixels::{Channel, PixelField};
use crate::vertices::{build_colors, field_vertices};
use crate::view::{frame_matrices, FrameMatrices, OrbitAngles, ViewParams};
use std::sync::Arc;

/// How the index width is chosen when an image is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexWidthPolicy {
    /// 16-bit when every index fits, otherwise 32-bit.
    #[default]
    Auto,
    Fixed(IndexWidth),
}

impl IndexWidthPolicy {
    pub fn resolve(self, vertex_count: u64, wide_supported: bool) -> Result<IndexWidth> {
        match self {
            Self::Auto => IndexWidth::select(vertex_count, wide_supported),
            Self::Fixed(IndexWidth::U32) if !wide_supported => {
                IndexWidth::U16.check(vertex_count).map(|()| IndexWidth::U16)
            }
            Self::Fixed(width) => width.check(vertex_count).map(|()| width),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSettings {
    pub topology: Topology,
    pub channel: Channel,
    pub index_width: IndexWidthPolicy,
    pub sphere_method: SphereMethod,
    /// Whether the device can draw with 32-bit indices.
    pub wide_indices: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            channel: Channel::default(),
            index_width: IndexWidthPolicy::default(),
            sphere_method: SphereMethod::default(),
            wide_indices: true,
        }
    }
}

/// Discrete inputs the scene reacts to.
#[derive(Debug, Clone)]
pub enum SceneEvent {
    ImageLoaded(PixelField),
    TopologyChanged(Topology),
    ChannelChanged(Channel),
}

/// Which buffers an event replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rebuilt {
    pub positions: bool,
    pub colors: bool,
    pub indices: bool,
}

impl Rebuilt {
    pub const NONE: Self = Self {
        positions: false,
        colors: false,
        indices: false,
    };

    pub const ALL: Self = Self {
        positions: true,
        colors: true,
        indices: true,
    };

    #[inline]
    pub fn any(self) -> bool {
        self.positions || self.colors || self.indices
    }
}

#[derive(Debug, Clone)]
pub struct SceneState {
    settings: SceneSettings,
    field: Arc<PixelField>,
    index_width: IndexWidth,
    positions: Arc<[[f32; 3]]>,
    colors: Arc<[[f32; 4]]>,
    indices: Arc<IndexBuffer>,
    sphere: BoundingSphere,
}

impl SceneState {
    /// Builds every buffer for `field`. The index width is fixed here for
    /// as long as this image stays loaded.
    pub fn load(field: PixelField, settings: SceneSettings) -> Result<Self> {
        let vertex_count = field.pixel_count() as u64;
        let index_width = settings
            .index_width
            .resolve(vertex_count, settings.wide_indices)?;

        let indices = build_indices(field.width(), field.height(), settings.topology, index_width)?;
        let positions = field_vertices(&field, settings.channel)?;
        let colors = build_colors(field.samples())?;
        let sphere = bounding_sphere_with(&positions, settings.sphere_method)?;

        log::debug!(
            "scene loaded: {}x{} {} {} channel, {} indices",
            field.width(),
            field.height(),
            settings.topology,
            settings.channel,
            index_width
        );

        Ok(Self {
            settings,
            field: Arc::new(field),
            index_width,
            positions: positions.into(),
            colors: colors.into(),
            indices: Arc::new(indices),
            sphere,
        })
    }

    pub fn apply(&mut self, event: SceneEvent) -> Result<Rebuilt> {
        match event {
            SceneEvent::ImageLoaded(field) => self.replace_image(field),
            SceneEvent::TopologyChanged(topology) => self.set_topology(topology),
            SceneEvent::ChannelChanged(channel) => self.set_channel(channel),
        }
    }

    /// Swaps in a new image, keeping the current topology, channel and
    /// policies.
    pub fn replace_image(&mut self, field: PixelField) -> Result<Rebuilt> {
        *self = Self::load(field, self.settings)?;
        Ok(Rebuilt::ALL)
    }

    pub fn set_topology(&mut self, topology: Topology) -> Result<Rebuilt> {
        if topology == self.settings.topology {
            return Ok(Rebuilt::NONE);
        }

        let indices = build_indices(self.width(), self.height(), topology, self.index_width)?;
        self.indices = Arc::new(indices);
        self.settings.topology = topology;

        Ok(Rebuilt {
            indices: true,
            ..Rebuilt::NONE
        })
    }

    /// Rebuilds positions only. The bounding sphere stays the one computed
    /// when the image was loaded.
    pub fn set_channel(&mut self, channel: Channel) -> Result<Rebuilt> {
        if channel == self.settings.channel {
            return Ok(Rebuilt::NONE);
        }

        self.positions = field_vertices(&self.field, channel)?.into();
        self.settings.channel = channel;

        Ok(Rebuilt {
            positions: true,
            ..Rebuilt::NONE
        })
    }

    pub fn frame(&self, orbit: &OrbitAngles, params: &ViewParams, aspect: f32) -> FrameMatrices {
        frame_matrices(&self.sphere, orbit, params, aspect)
    }

    #[inline]
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.settings.topology
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.settings.channel
    }

    #[inline]
    pub fn index_width(&self) -> IndexWidth {
        self.index_width
    }

    #[inline]
    pub fn field(&self) -> &Arc<PixelField> {
        &self.field
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.field.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.field.height()
    }

    #[inline]
    pub fn positions(&self) -> &Arc<[[f32; 3]]> {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &Arc<[[f32; 4]]> {
        &self.colors
    }

    #[inline]
    pub fn indices(&self) -> &Arc<IndexBuffer> {
        &self.indices
    }

    #[inline]
    pub fn sphere(&self) -> &BoundingSphere {
        &self.sphere
    }
}
