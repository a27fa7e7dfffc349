/// Multisample anti-aliasing levels for render buffers

/// Requested MSAA level
///
/// The sample count actually used is the minimum of the requested count and
/// what the device reports for the buffer formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MsaaLevel {
    /// Single sample
    #[default]
    Disable,
    Two,
    Four,
    Eight,
    /// Whatever the device supports
    Maximum,
}

impl MsaaLevel {
    /// Samples requested by this level (`u32::MAX` for `Maximum`)
    pub fn requested_samples(&self) -> u32 {
        match self {
            MsaaLevel::Disable => 1,
            MsaaLevel::Two => 2,
            MsaaLevel::Four => 4,
            MsaaLevel::Eight => 8,
            MsaaLevel::Maximum => u32::MAX,
        }
    }

    /// Sample count to use on a device supporting at most `device_max` samples
    pub fn sample_count(&self, device_max: u32) -> u32 {
        self.requested_samples().min(device_max.max(1))
    }
}

#[cfg(test)]
#[path = "msaa_tests.rs"]
mod tests;
