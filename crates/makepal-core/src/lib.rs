/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by all makepal libraries
//!
//! This crate provides the pieces the color resolver, the png encoder
//! and the command line front end agree on.
//!
//! It currently contains
//!
//! - A byte sink trait and an endian aware writer built on top of it
//! - Colorspace and bit depth information shared by images
//! - Image encoder options
//!
pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
pub mod options;
