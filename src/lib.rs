//! # Diffusion schedules for animated explainers
//!
//! Noise schedules, closed-form forward sampling and the small Gaussian
//! toolbox (Box–Muller, kernel density estimates, seeded shuffles) that drive
//! the diffusion, noising and sampling animations of a documentation site.
//! Rendering and UI live elsewhere; everything here is a pure function of its
//! inputs.

pub mod error;
pub mod pipelines;
pub mod schedulers;
pub mod utils;

pub use error::{Error, Result};

#[cfg(all(test, feature = "ndarray"))]
pub type TestBackend = burn::backend::ndarray::NdArray<f32>;

#[cfg(all(test, feature = "torch", not(feature = "ndarray")))]
pub type TestBackend = burn::backend::libtorch::LibTorch<f32>;

#[cfg(all(
    test,
    feature = "wgpu",
    not(any(feature = "ndarray", feature = "torch")),
    not(target_os = "macos")
))]
pub type TestBackend = burn::backend::wgpu::Wgpu<burn::backend::wgpu::Vulkan, f32, i32>;

#[cfg(all(
    test,
    feature = "wgpu",
    not(any(feature = "ndarray", feature = "torch")),
    target_os = "macos"
))]
pub type TestBackend = burn::backend::wgpu::Wgpu<burn::backend::wgpu::Metal, f32, i32>;
