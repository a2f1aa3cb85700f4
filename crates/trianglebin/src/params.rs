//! User-tunable parameters.
//!
//! Every setter clamps into the documented range, so a `ParameterState`
//! never holds an out-of-range value whatever the UI hands it.

pub const TRIANGLE_COUNT_MAX: u32 = 100;
pub const PIXEL_BUDGET_THOUSANDS_MAX: u32 = 50_000;
pub const EXTRA_VERTEX_FLOATS_MAX: u32 = 24;

/// Offscreen color format.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    #[default]
    Rgba8Unorm,
    Rgba32Float,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 2] = [PixelFormat::Rgba8Unorm, PixelFormat::Rgba32Float];

    pub fn label(self) -> &'static str {
        match self {
            PixelFormat::Rgba8Unorm => "R8G8B8A8_UNORM",
            PixelFormat::Rgba32Float => "R32G32B32A32_FLOAT",
        }
    }

    pub fn texture_format(self) -> wgpu::TextureFormat {
        match self {
            PixelFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            PixelFormat::Rgba32Float => wgpu::TextureFormat::Rgba32Float,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// MSAA sample count of the offscreen target.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum SampleCount {
    #[default]
    X1,
    X2,
    X4,
    X8,
}

impl SampleCount {
    pub const ALL: [SampleCount; 4] = [SampleCount::X1, SampleCount::X2, SampleCount::X4, SampleCount::X8];

    pub fn count(self) -> u32 {
        1 << self.index()
    }

    pub fn label(self) -> &'static str {
        match self {
            SampleCount::X1 => "1",
            SampleCount::X2 => "2",
            SampleCount::X4 => "4",
            SampleCount::X8 => "8",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_count(count: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.count() == count)
    }
}

/// The five values edited by the toolbox panel.
///
/// Starts zeroed: no triangles, no pixel budget, no extra vertex floats,
/// 8-bit UNORM and a single sample.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ParameterState {
    triangle_count: u32,
    pixel_budget_thousands: u32,
    extra_vertex_floats: u32,
    pixel_format: PixelFormat,
    sample_count: SampleCount,
}

fn clamp_index(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

impl ParameterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    pub fn pixel_budget_thousands(&self) -> u32 {
        self.pixel_budget_thousands
    }

    /// Pixel budget of the triangle pass, `pixel_budget_thousands * 1000`.
    pub fn pixel_limit(&self) -> u32 {
        self.pixel_budget_thousands * 1000
    }

    pub fn extra_vertex_floats(&self) -> u32 {
        self.extra_vertex_floats
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    pub fn sample_count(&self) -> SampleCount {
        self.sample_count
    }

    // ── setters ───────────────────────────────────────────────────────────

    pub fn set_triangle_count(&mut self, value: i64) {
        self.triangle_count = clamp_index(value, TRIANGLE_COUNT_MAX);
    }

    pub fn set_pixel_budget_thousands(&mut self, value: i64) {
        self.pixel_budget_thousands = clamp_index(value, PIXEL_BUDGET_THOUSANDS_MAX);
    }

    pub fn set_extra_vertex_floats(&mut self, value: i64) {
        self.extra_vertex_floats = clamp_index(value, EXTRA_VERTEX_FLOATS_MAX);
    }

    pub fn set_pixel_format_index(&mut self, index: i64) {
        let i = clamp_index(index, PixelFormat::ALL.len() as u32 - 1);
        self.pixel_format = PixelFormat::ALL[i as usize];
    }

    pub fn set_sample_count_index(&mut self, index: i64) {
        let i = clamp_index(index, SampleCount::ALL.len() as u32 - 1);
        self.sample_count = SampleCount::ALL[i as usize];
    }

    pub fn set_sample_count(&mut self, samples: SampleCount) {
        self.sample_count = samples;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zero_and_first_entries() {
        let p = ParameterState::new();
        assert_eq!(p.triangle_count(), 0);
        assert_eq!(p.pixel_budget_thousands(), 0);
        assert_eq!(p.extra_vertex_floats(), 0);
        assert_eq!(p.pixel_format(), PixelFormat::Rgba8Unorm);
        assert_eq!(p.sample_count(), SampleCount::X1);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let mut p = ParameterState::new();
        p.set_triangle_count(-5);
        p.set_pixel_budget_thousands(-1);
        p.set_extra_vertex_floats(i64::MIN);
        p.set_pixel_format_index(-3);
        p.set_sample_count_index(-1);
        assert_eq!(p, ParameterState::new());
    }

    #[test]
    fn large_values_clamp_to_bounds() {
        let mut p = ParameterState::new();
        p.set_triangle_count(1_000);
        p.set_pixel_budget_thousands(i64::MAX);
        p.set_extra_vertex_floats(25);
        p.set_pixel_format_index(7);
        p.set_sample_count_index(4);
        assert_eq!(p.triangle_count(), TRIANGLE_COUNT_MAX);
        assert_eq!(p.pixel_budget_thousands(), PIXEL_BUDGET_THOUSANDS_MAX);
        assert_eq!(p.extra_vertex_floats(), EXTRA_VERTEX_FLOATS_MAX);
        assert_eq!(p.pixel_format(), PixelFormat::Rgba32Float);
        assert_eq!(p.sample_count(), SampleCount::X8);
    }

    #[test]
    fn in_range_values_are_kept() {
        let mut p = ParameterState::new();
        p.set_triangle_count(42);
        p.set_extra_vertex_floats(7);
        p.set_sample_count_index(2);
        assert_eq!(p.triangle_count(), 42);
        assert_eq!(p.extra_vertex_floats(), 7);
        assert_eq!(p.sample_count().count(), 4);
    }

    #[test]
    fn max_pixel_limit_fits_u32() {
        let mut p = ParameterState::new();
        p.set_pixel_budget_thousands(i64::from(PIXEL_BUDGET_THOUSANDS_MAX));
        assert_eq!(p.pixel_limit(), 50_000_000);
    }

    #[test]
    fn sample_counts_round_trip_through_count() {
        for s in SampleCount::ALL {
            assert_eq!(SampleCount::from_count(s.count()), Some(s));
        }
        assert_eq!(SampleCount::from_count(3), None);
        assert_eq!(SampleCount::X8.count(), 8);
    }

    #[test]
    fn format_labels_match_list_entries() {
        let labels: Vec<_> = PixelFormat::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["R8G8B8A8_UNORM", "R32G32B32A32_FLOAT"]);
    }
}
