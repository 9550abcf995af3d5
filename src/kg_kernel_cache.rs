use crate::kg_distance_model::ExactKernel;
use crate::kg_interface::SimError;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Disk cache for exact distance kernels, keyed by grid size.
///
/// Building the (2N-1)×(2N-1) kernel is the expensive part of an exact
/// configuration, and it only depends on N and r, so repeated experiments
/// can reuse it across runs. The cache wraps [`ExactKernel::build`]: a
/// load whose stored parameters mismatch, whose bytes fail to decode, or
/// whose kernel is degenerate (no weight next to the center) quietly
/// falls back to a fresh build and rewrites the file.
///
/// One file per grid size (`distance_kernel_N{n}.bin`); the exponent is
/// stored in the payload and checked on load, so a stale-r file counts as
/// a miss rather than serving wrong weights.
pub struct KernelCache {
    dir: PathBuf,
}

impl KernelCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, n: usize) -> PathBuf {
        self.dir.join(format!("distance_kernel_N{}.bin", n))
    }

    /// Load the kernel for (n, r) from disk, or build and persist it.
    pub fn load_or_build(&self, n: usize, r: f64) -> Result<ExactKernel, SimError> {
        let path = self.file_for(n);

        match Self::try_load(&path, n, r) {
            Ok(kernel) => {
                info!("loaded distance kernel for N={} from {}", n, path.display());
                Ok(kernel)
            }
            Err(reason) => {
                warn!(
                    "kernel cache miss for N={} ({}), building it again",
                    n, reason
                );
                let kernel = ExactKernel::build(n, r)?;
                self.save(&path, &kernel)?;
                Ok(kernel)
            }
        }
    }

    fn try_load(path: &Path, n: usize, r: f64) -> Result<ExactKernel, String> {
        let bytes = fs::read(path).map_err(|e| e.to_string())?;
        let kernel: ExactKernel = bincode::deserialize(&bytes).map_err(|e| e.to_string())?;

        if kernel.n() != n {
            return Err(format!("stored for N={}", kernel.n()));
        }
        if kernel.r() != r {
            return Err(format!("stored for r={}", kernel.r()));
        }
        // Non-degeneracy: the center itself carries no weight, but its
        // neighbor always must.
        if kernel.offset_weight(0, 1) == 0.0 {
            return Err("degenerate kernel".to_string());
        }

        Ok(kernel)
    }

    fn save(&self, path: &Path, kernel: &ExactKernel) -> Result<(), SimError> {
        fs::create_dir_all(&self.dir).map_err(|e| SimError::KernelCache {
            reason: format!("create {}: {}", self.dir.display(), e),
        })?;
        let bytes = bincode::serialize(kernel).map_err(|e| SimError::KernelCache {
            reason: format!("encode kernel: {}", e),
        })?;
        fs::write(path, bytes).map_err(|e| SimError::KernelCache {
            reason: format!("write {}: {}", path.display(), e),
        })?;
        info!("saved distance kernel for N={} to {}", kernel.n(), path.display());
        Ok(())
    }
}
