// src/hash.rs

//! Package identity hashing
//!
//! A package id names one binary configuration of a release: the same
//! descriptor, settings and options always hash to the same id, no matter
//! the order options were given in.

use crate::recipe::{BuildOptions, PackageDescriptor};
use crate::toolchain::Settings;
use sha2::{Digest, Sha256};

/// SHA-256 of `data` as lowercase hex
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Compute the package id for one configuration
pub fn package_id(
    descriptor: &PackageDescriptor,
    settings: &Settings,
    options: &BuildOptions,
) -> String {
    let mut data = String::new();

    data.push_str(&format!(
        "name:{}\nversion:{}\n",
        descriptor.name, descriptor.version
    ));

    data.push_str(&format!(
        "settings.os:{}\nsettings.arch:{}\nsettings.compiler:{}\nsettings.build_type:{}\n",
        settings.os, settings.arch, settings.compiler, settings.build_type
    ));

    // BuildOptions iterates in name order
    for (name, value) in options.iter() {
        data.push_str(&format!("options.{}:{}\n", name, value));
    }

    sha256_hex(data.as_bytes())
}
