//! Device configuration: identity, bound resource, and the typestate builder.

use core::marker::PhantomData;

use heapless::String;

use crate::device::{error::ConfigError, window::MmioResource};

/// Register value forced on attach and detach unless overridden.
pub const DEFAULT_RESET: u8 = 0x00;

/// Fixed capacity of a device name, in bytes.
pub const NAME_CAPACITY: usize = 32;

/// Fixed capacity of a binding key, in bytes.
pub const KEY_CAPACITY: usize = 64;

/// Immutable identity distinguishing device instances.
///
/// The name doubles as the log label; the binding key is what the platform
/// layer matches against its hardware description. Neither has any effect
/// on transfer behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    name: String<NAME_CAPACITY>,
    binding_key: String<KEY_CAPACITY>,
}

impl DeviceIdentity {
    /// # Errors
    /// * [`ConfigError::NameTooLong`] - `name` exceeds [`NAME_CAPACITY`]
    /// * [`ConfigError::BindingKeyTooLong`] - `binding_key` exceeds [`KEY_CAPACITY`]
    pub fn new(name: &str, binding_key: &str) -> Result<Self, ConfigError> {
        let mut owned_name = String::new();
        owned_name
            .push_str(name)
            .map_err(|_| ConfigError::NameTooLong)?;

        let mut owned_key = String::new();
        owned_key
            .push_str(binding_key)
            .map_err(|_| ConfigError::BindingKeyTooLong)?;

        Ok(Self {
            name: owned_name,
            binding_key: owned_key,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn binding_key(&self) -> &str {
        &self.binding_key
    }
}

/// Configuration consumed at attach.
///
/// `N` is the shadow buffer length in bytes, fixed to the length of the
/// bound register resource. The two observed instances differ only in
/// their [`DeviceIdentity`].
#[derive(Debug, Clone)]
pub struct DeviceConfig<const N: usize> {
    identity: DeviceIdentity,
    resource: MmioResource,
    reset_value: u8,
}

impl<const N: usize> DeviceConfig<N> {
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn resource(&self) -> MmioResource {
        self.resource
    }

    pub fn reset_value(&self) -> u8 {
        self.reset_value
    }

    pub fn buffer_len(&self) -> usize {
        N
    }
}

// Builder states
pub struct NeedBufferLen;
pub struct NeedIdentity;
pub struct NeedResource;
pub struct Ready;

/// Typestate builder for [`DeviceConfig`].
///
/// Stages must be supplied in order; the compiler rejects chains that skip
/// one. The reset value is optional and defaults to [`DEFAULT_RESET`].
pub struct DeviceBuilder<const N: usize, State> {
    identity: Option<DeviceIdentity>,
    resource: Option<MmioResource>,
    reset_value: u8,
    _phantom: PhantomData<State>,
}

// Start the builder
impl DeviceBuilder<0, NeedBufferLen> {
    pub fn new() -> Self {
        DeviceBuilder {
            identity: None,
            resource: None,
            reset_value: DEFAULT_RESET,
            _phantom: PhantomData,
        }
    }

    /// Set the shadow buffer length.
    ///
    /// # Panics
    /// Panics at runtime if `N` is 0.
    pub fn buffer_len<const N: usize>(self) -> DeviceBuilder<N, NeedIdentity> {
        assert!(N > 0, "Buffer length must cover at least one byte");

        DeviceBuilder {
            identity: None,
            resource: None,
            reset_value: self.reset_value,
            _phantom: PhantomData,
        }
    }
}

impl Default for DeviceBuilder<0, NeedBufferLen> {
    fn default() -> Self {
        Self::new()
    }
}

// Set identity
impl<const N: usize> DeviceBuilder<N, NeedIdentity> {
    pub fn identity(self, identity: DeviceIdentity) -> DeviceBuilder<N, NeedResource> {
        DeviceBuilder {
            identity: Some(identity),
            resource: None,
            reset_value: self.reset_value,
            _phantom: PhantomData,
        }
    }
}

// Set resource
impl<const N: usize> DeviceBuilder<N, NeedResource> {
    /// Set the bound hardware resource.
    ///
    /// # Panics
    /// Panics at runtime if the resource length does not match the buffer
    /// length `N`.
    pub fn resource(self, resource: MmioResource) -> DeviceBuilder<N, Ready> {
        assert_eq!(
            N,
            resource.length(),
            "Resource length {} does not match buffer length {}",
            resource.length(),
            N,
        );

        DeviceBuilder {
            identity: self.identity,
            resource: Some(resource),
            reset_value: self.reset_value,
            _phantom: PhantomData,
        }
    }
}

// Build the final config
impl<const N: usize> DeviceBuilder<N, Ready> {
    /// Override the register value forced on attach and detach.
    pub fn reset_value(mut self, value: u8) -> Self {
        self.reset_value = value;
        self
    }

    pub fn build(self) -> DeviceConfig<N> {
        DeviceConfig {
            identity: self.identity.unwrap(),
            resource: self.resource.unwrap(),
            reset_value: self.reset_value,
        }
    }
}
