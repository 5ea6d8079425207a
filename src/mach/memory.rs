use super::Val;
use crate::error;
use crate::lang::Error;
use rustc_hash::FxHashMap;

type Result<T> = std::result::Result<T, Error>;

/// ## Section variable memory
///
/// One flat name → value map per section. A name appears at most once and
/// its tag only changes through [`SectionMemory::reinsert`], which replaces
/// payload and tag together. The list and loop engines build their internal
/// variables on top of this same map.
#[derive(Debug, Default)]
pub struct SectionMemory {
    vars: FxHashMap<String, Val>,
}

impl SectionMemory {
    pub fn new() -> SectionMemory {
        SectionMemory::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Creates a variable. The name must not already exist.
    pub fn insert(&mut self, name: &str, val: Val) -> Result<()> {
        if self.vars.contains_key(name) {
            return Err(error!(DuplicateVariable; "variable '{}' already exists", name));
        }
        self.vars.insert(name.to_string(), val);
        Ok(())
    }

    /// Replaces an existing variable's value and tag.
    pub fn reinsert(&mut self, name: &str, val: Val) -> Result<()> {
        match self.vars.get_mut(name) {
            Some(slot) => {
                *slot = val;
                Ok(())
            }
            None => Err(error!(UnknownVariable; "variable '{}' doesn't exist", name)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        match self.vars.remove(name) {
            Some(_) => Ok(()),
            None => Err(error!(UnknownVariable; "variable '{}' doesn't exist", name)),
        }
    }

    pub fn get(&self, name: &str) -> Result<Val> {
        match self.vars.get(name) {
            Some(val) => Ok(val.clone()),
            None => Err(error!(UnknownVariable; "variable '{}' doesn't exist", name)),
        }
    }

    /// Moves a variable into another memory. The receiver must not already
    /// hold the name.
    pub fn transfer(&mut self, name: &str, to: &mut SectionMemory) -> Result<()> {
        if to.contains(name) {
            return Err(
                error!(DuplicateVariable; "variable '{}' already exists at the receiver", name),
            );
        }
        match self.vars.remove(name) {
            Some(val) => {
                to.vars.insert(name.to_string(), val);
                Ok(())
            }
            None => Err(error!(UnknownVariable; "variable '{}' doesn't exist", name)),
        }
    }

    /// Resolves a `$name` token to the stringified value of `name`.
    pub fn resolve_ref(&self, token: &str) -> Result<String> {
        let name = token.strip_prefix('$').unwrap_or(token);
        Ok(self.get(name)?.to_string())
    }

    /// Resolves a parameter token: `$name` becomes the stringified value,
    /// anything else passes through untouched.
    pub fn resolve_token(&self, token: &str) -> Result<String> {
        if token.starts_with('$') {
            self.resolve_ref(token)
        } else {
            Ok(token.to_string())
        }
    }
}

/// The shared preamble of every operation: a non-`nullptr` return address
/// must already exist in memory.
pub(crate) fn check_return(mem: &SectionMemory, ret: &str) -> Result<()> {
    if ret != "nullptr" && !mem.contains(ret) {
        return Err(error!(UnknownReturnAddress; "can't find the return address '{}'", ret));
    }
    Ok(())
}
