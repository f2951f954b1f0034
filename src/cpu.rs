//! CPU feature detection.
//!
//! Discovers the widest available SIMD tier once per process and caches the
//! result. Never fatal: any uncertainty degrades to [`SimdTier::Scalar`].

use std::sync::OnceLock;

/// The selected SIMD tier for block processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdTier {
    /// No SIMD acceleration; process one byte at a time.
    Scalar,
    /// 128-bit vectors (SSE2 on x86_64, NEON on aarch64).
    Vector128,
    /// 256-bit vectors (AVX2).
    Vector256,
    /// 512-bit vectors (AVX-512F + AVX-512BW).
    Vector512,
}

/// Immutable, process-wide record of the detected CPU capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuCaps {
    /// The chosen tier.
    pub tier: SimdTier,
    /// Natural vector width in bytes for `tier` (1, 16, 32, or 64).
    pub vector_width: usize,
}

impl CpuCaps {
    const fn scalar() -> Self {
        Self {
            tier: SimdTier::Scalar,
            vector_width: 1,
        }
    }
}

static CAPS: OnceLock<CpuCaps> = OnceLock::new();

/// Detect the widest available SIMD tier, caching the result for the
/// process lifetime.
///
/// Policy: prefer 512-bit when both the foundation (`avx512f`) and
/// byte/word (`avx512bw`) subsets are present; else 256-bit (`avx2`); else
/// 128-bit (`sse2` on x86_64, always present on aarch64); else scalar.
pub fn detect() -> CpuCaps {
    *CAPS.get_or_init(detect_uncached)
}

#[cfg(target_arch = "x86_64")]
fn detect_uncached() -> CpuCaps {
    if std::is_x86_feature_detected!("avx512f") && std::is_x86_feature_detected!("avx512bw") {
        CpuCaps {
            tier: SimdTier::Vector512,
            vector_width: 64,
        }
    } else if std::is_x86_feature_detected!("avx2") {
        CpuCaps {
            tier: SimdTier::Vector256,
            vector_width: 32,
        }
    } else if std::is_x86_feature_detected!("sse2") {
        CpuCaps {
            tier: SimdTier::Vector128,
            vector_width: 16,
        }
    } else {
        CpuCaps::scalar()
    }
}

#[cfg(target_arch = "aarch64")]
fn detect_uncached() -> CpuCaps {
    // NEON is mandatory on aarch64; no runtime probe needed.
    CpuCaps {
        tier: SimdTier::Vector128,
        vector_width: 16,
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_uncached() -> CpuCaps {
    CpuCaps::scalar()
}
