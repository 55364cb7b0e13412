// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod access;
pub mod config;
pub mod import;
pub mod notifications;
pub mod verify_sharing;
