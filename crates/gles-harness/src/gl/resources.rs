/// Set of live handles of one kind, each released exactly once.
#[derive(Debug, Clone)]
pub struct Ledger<H> {
    live: Vec<H>,
}

impl<H> Default for Ledger<H> {
    fn default() -> Self {
        Self { live: Vec::new() }
    }
}

impl<H: Copy + PartialEq> Ledger<H> {
    /// Records `handle` as owned. Tracking the same handle twice is a no-op.
    pub fn track(&mut self, handle: H) -> H {
        if !self.live.contains(&handle) {
            self.live.push(handle);
        }
        handle
    }

    /// Hands over every live handle and leaves the ledger empty.
    pub fn take_all(&mut self) -> Vec<H> {
        std::mem::take(&mut self.live)
    }
}

/// How many objects of each kind a release deleted.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ReleaseCounts {
    pub programs: usize,
    pub buffers: usize,
    pub textures: usize,
}

impl ReleaseCounts {
    pub fn total(&self) -> usize {
        self.programs + self.buffers + self.textures
    }
}

/// GPU objects created during a test's `init`.
///
/// The runtime releases everything once, after the frame loop ends.
#[derive(Debug, Default)]
pub struct GlResources {
    pub programs: Ledger<glow::Program>,
    pub buffers: Ledger<glow::Buffer>,
    pub textures: Ledger<glow::Texture>,
}

impl GlResources {
    /// Deletes every tracked object. A second call deletes nothing.
    pub fn release(&mut self, gl: &glow::Context) -> ReleaseCounts {
        use glow::HasContext;

        let programs = self.programs.take_all();
        let buffers = self.buffers.take_all();
        let textures = self.textures.take_all();

        unsafe {
            gl.use_program(None);
            for &p in &programs {
                gl.delete_program(p);
            }
            for &b in &buffers {
                gl.delete_buffer(b);
            }
            for &t in &textures {
                gl.delete_texture(t);
            }
        }

        let counts = ReleaseCounts {
            programs: programs.len(),
            buffers: buffers.len(),
            textures: textures.len(),
        };
        log::debug!(
            "released {} programs, {} buffers, {} textures",
            counts.programs,
            counts.buffers,
            counts.textures
        );
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_is_idempotent() {
        let mut l = Ledger::default();
        l.track(3u32);
        l.track(3);
        l.track(4);
        assert_eq!(l.take_all(), vec![3, 4]);
    }

    #[test]
    fn take_all_empties_ledger() {
        let mut l = Ledger::default();
        for h in [1u32, 2, 3] {
            l.track(h);
        }
        let mut first = l.take_all();
        first.sort();
        assert_eq!(first, vec![1, 2, 3]);
        assert!(l.take_all().is_empty());
    }

    #[test]
    fn track_returns_the_handle() {
        let mut l = Ledger::default();
        assert_eq!(l.track(7u32), 7);
        assert_eq!(l.track(7), 7);
    }

    #[test]
    fn counts_total() {
        let c = ReleaseCounts {
            programs: 2,
            buffers: 9,
            textures: 0,
        };
        assert_eq!(c.total(), 11);
    }
}
