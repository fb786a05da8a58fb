use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
            return Some(f);
        }
    }

    Some(first)
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Picks the rasterization mode and the device features it needs.
///
/// Line mode is only requested when the adapter supports it.
pub(crate) fn choose_polygon_mode(
    adapter_features: wgpu::Features,
    wireframe: bool,
) -> (wgpu::PolygonMode, wgpu::Features) {
    if !wireframe {
        return (wgpu::PolygonMode::Fill, wgpu::Features::empty());
    }

    if adapter_features.contains(wgpu::Features::POLYGON_MODE_LINE) {
        (wgpu::PolygonMode::Line, wgpu::Features::POLYGON_MODE_LINE)
    } else {
        log::warn!("adapter lacks POLYGON_MODE_LINE; drawing filled polygons instead of wireframe");
        (wgpu::PolygonMode::Fill, wgpu::Features::empty())
    }
}

/// Surface extent for a window size; wgpu rejects zero-sized configurations.
pub(crate) fn surface_extent(size: PhysicalSize<u32>) -> (u32, u32) {
    (size.width.max(1), size.height.max(1))
}

pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;

    // wgpu rejects 0x0 configurations; keep the old one until the window is restored.
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, Features, PolygonMode, TextureFormat};

    // ── surface format ────────────────────────────────────────────────────

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn srgb_preferred_when_offered() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn first_format_when_srgb_not_wanted() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn first_format_when_no_srgb_available() {
        let formats = [TextureFormat::Rgba16Float];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Rgba16Float)
        );
    }

    // ── alpha mode ────────────────────────────────────────────────────────

    #[test]
    fn requested_alpha_mode_kept_when_supported() {
        let supported = [CompositeAlphaMode::Opaque, CompositeAlphaMode::PreMultiplied];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::PreMultiplied
        );
    }

    #[test]
    fn unsupported_alpha_mode_falls_back_to_first() {
        let supported = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PostMultiplied)),
            CompositeAlphaMode::Opaque
        );
    }

    #[test]
    fn empty_alpha_modes_use_auto() {
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    // ── extent ────────────────────────────────────────────────────────────

    #[test]
    fn zero_sized_window_still_gets_a_valid_extent() {
        assert_eq!(surface_extent(PhysicalSize::new(0, 0)), (1, 1));
        assert_eq!(surface_extent(PhysicalSize::new(0, 720)), (1, 720));
    }

    #[test]
    fn nonzero_extent_is_unchanged() {
        assert_eq!(surface_extent(PhysicalSize::new(1280, 720)), (1280, 720));
    }

    // ── polygon mode ──────────────────────────────────────────────────────

    #[test]
    fn wireframe_requests_line_feature_when_available() {
        let (mode, features) = choose_polygon_mode(Features::POLYGON_MODE_LINE, true);
        assert_eq!(mode, PolygonMode::Line);
        assert_eq!(features, Features::POLYGON_MODE_LINE);
    }

    #[test]
    fn wireframe_falls_back_to_fill_without_feature() {
        let (mode, features) = choose_polygon_mode(Features::empty(), true);
        assert_eq!(mode, PolygonMode::Fill);
        assert!(features.is_empty());
    }

    #[test]
    fn fill_requested_never_asks_for_line_feature() {
        let (mode, features) = choose_polygon_mode(Features::POLYGON_MODE_LINE, false);
        assert_eq!(mode, PolygonMode::Fill);
        assert!(features.is_empty());
    }
}
