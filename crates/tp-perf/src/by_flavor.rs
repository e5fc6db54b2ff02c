//! Fixed dispatch table with one slot per simulated flavor.

use tp_core::{Error, Flavor, Result};
use tp_io::Group;

/// One `T` for each of B, C, U and T jets.
#[derive(Debug, Clone)]
pub struct ByFlavor<T> {
    slots: [T; 4],
}

impl<T> ByFlavor<T> {
    /// Build every slot, in output order.
    pub fn try_new(mut make: impl FnMut(Flavor) -> Result<T>) -> Result<Self> {
        let [b, c, u, t] = Flavor::SIMULATED;
        Ok(Self { slots: [make(b)?, make(c)?, make(u)?, make(t)?] })
    }

    /// Slot for `flavor`; `None` for data and error jets.
    pub fn get(&self, flavor: Flavor) -> Option<&T> {
        self.slots.get(flavor.slot()?)
    }

    /// Mutable slot for `flavor`.
    pub fn get_mut(&mut self, flavor: Flavor) -> Option<&mut T> {
        self.slots.get_mut(flavor.slot()?)
    }

    /// Create one named group per flavor and hand each slot its group.
    pub fn write_to(
        &self,
        group: &mut Group,
        mut write: impl FnMut(&T, &mut Group) -> Result<()>,
    ) -> Result<()> {
        for flavor in Flavor::SIMULATED {
            let name = flavor.group_name()?;
            let slot = self.get(flavor).ok_or(Error::UnsupportedFlavor(flavor))?;
            write(slot, group.create_group(name)?)?;
        }
        Ok(())
    }
}
