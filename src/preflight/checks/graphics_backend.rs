//! Graphics backend preflight check

use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::preflight::check::{CheckResult, Findings, PreflightCheck};

/// Checks that wgpu can see at least one adapter
///
/// Headless machines (CI, containers) legitimately have none, so a missing
/// adapter is a warning rather than a failure.
pub struct GraphicsBackendCheck;

impl GraphicsBackendCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GraphicsBackendCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl PreflightCheck for GraphicsBackendCheck {
    fn name(&self) -> &'static str {
        "Graphics Backend"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates wgpu instance creation and adapter availability")
    }

    fn run(&self, _config: &GameConfig) -> CheckResult {
        let mut findings = Findings::new();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        findings.ok("wgpu instance created");

        let adapters: Vec<_> = instance
            .enumerate_adapters(wgpu::Backends::all())
            .into_iter()
            .collect();

        if adapters.is_empty() {
            findings.warn("No graphics adapters found, the game window cannot open here");
        } else {
            describe_adapters(&adapters, &mut findings);
        }

        findings.finish(
            format!("{} adapter(s) found", adapters.len()),
            format!("{} adapter(s) usable, with warnings", adapters.len()),
            "Graphics backend unusable",
        )
    }
}

fn describe_adapters(adapters: &[wgpu::Adapter], findings: &mut Findings) {
    let mut backends = BTreeSet::new();
    let mut hardware = false;
    for (i, adapter) in adapters.iter().enumerate() {
        let info = adapter.get_info();
        backends.insert(format!("{:?}", info.backend));
        hardware |= matches!(
            info.device_type,
            wgpu::DeviceType::DiscreteGpu | wgpu::DeviceType::IntegratedGpu
        );
        findings.note(format!(
            "[{}] {} - {:?} ({:?})",
            i, info.name, info.device_type, info.backend
        ));
    }
    findings.ok(format!(
        "Backends available: {}",
        backends.into_iter().collect::<Vec<_>>().join(", ")
    ));

    // Sprites need an sRGB RGBA texture the GPU can filter
    let srgb_ok = adapters.iter().any(|adapter| {
        adapter
            .get_texture_format_features(wgpu::TextureFormat::Rgba8UnormSrgb)
            .flags
            .contains(wgpu::TextureFormatFeatureFlags::FILTERABLE)
    });
    if !srgb_ok {
        findings.warn("No adapter can filter Rgba8UnormSrgb textures");
    }
    if !hardware {
        findings.warn("Only software adapters available");
    }
}
