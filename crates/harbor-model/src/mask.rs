use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Capabilities a party can hold on a resource. No capability implies another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    Create,
    Read,
    Write,
    Execute,
    Delete,
}

impl Permission {
    pub const ALL: [Permission; PermissionMask::WIDTH] = [
        Permission::Create,
        Permission::Read,
        Permission::Write,
        Permission::Execute,
        Permission::Delete,
    ];

    pub const fn index(self) -> usize {
        match self {
            Permission::Create => 0,
            Permission::Read => 1,
            Permission::Write => 2,
            Permission::Execute => 3,
            Permission::Delete => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::Create => "Create",
            Permission::Read => "Read",
            Permission::Write => "Write",
            Permission::Execute => "Execute",
            Permission::Delete => "Delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MaskError::UnknownPermission(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    #[error("permission mask must have {expected} elements, got {actual}")]
    WrongWidth { expected: usize, actual: usize },
    #[error("exactly one action must be requested, mask has {0} set")]
    NotSingle(usize),
    #[error("unknown permission '{0}'")]
    UnknownPermission(String),
}

/// Ordered set of capability bits: Create, Read, Write, Execute, Delete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionMask([bool; PermissionMask::WIDTH]);

impl PermissionMask {
    pub const WIDTH: usize = 5;

    pub const fn none() -> Self {
        Self([false; Self::WIDTH])
    }

    pub const fn all() -> Self {
        Self([true; Self::WIDTH])
    }

    pub fn single(permission: Permission) -> Self {
        Self::none().with(permission)
    }

    pub fn of(permissions: &[Permission]) -> Self {
        permissions
            .iter()
            .fold(Self::none(), |mask, p| mask.with(*p))
    }

    /// Accepts the positional boolean form used on the wire.
    pub fn from_bits(bits: &[bool]) -> Result<Self, MaskError> {
        let array: [bool; Self::WIDTH] = bits.try_into().map_err(|_| MaskError::WrongWidth {
            expected: Self::WIDTH,
            actual: bits.len(),
        })?;
        Ok(Self(array))
    }

    pub fn bits(&self) -> [bool; Self::WIDTH] {
        self.0
    }

    pub fn with(mut self, permission: Permission) -> Self {
        self.0[permission.index()] = true;
        self
    }

    pub fn union(self, other: PermissionMask) -> Self {
        let mut bits = self.0;
        for (bit, extra) in bits.iter_mut().zip(other.0) {
            *bit |= extra;
        }
        Self(bits)
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0[permission.index()]
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn permissions(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.into_iter().filter(|p| self.contains(*p))
    }

    /// The one requested action of an authorization query.
    pub fn single_action(&self) -> Result<Permission, MaskError> {
        let mut set = self.permissions();
        match (set.next(), set.next()) {
            (Some(permission), None) => Ok(permission),
            _ => Err(MaskError::NotSingle(self.count())),
        }
    }
}

impl From<Permission> for PermissionMask {
    fn from(permission: Permission) -> Self {
        PermissionMask::single(permission)
    }
}

impl fmt::Display for PermissionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.permissions().map(Permission::as_str).collect();
        write!(f, "[{}]", names.join(","))
    }
}
