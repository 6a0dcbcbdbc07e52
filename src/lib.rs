// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! This crate decodes and encodes SML (Smart Message Language), the binary
//! protocol German smart electricity meters use to report readings.
//! # Examples
//! ```no_run
//! # extern crate sml_rs;
//! # use sml_rs::transport;
//! # use std::net::TcpStream;
//!
//! # fn main() {
//!     let mut stream = match TcpStream::connect("127.0.0.1:9999") {
//!         Ok(s) => s,
//!         Err(e) => {
//!             println!("{:?}", e.to_string());
//!             return;
//!         }
//!     };
//!
//!     match transport::read(&mut stream) {
//!         Ok(file) => println!("{:?}", file),
//!         Err(e) => println!("{:?}", e.to_string()),
//!     }
//! # }
//! ```
pub mod buffer;
mod constant;
pub mod crc;
pub mod error;
pub mod file;
pub mod list;
pub mod message;
pub mod messages;
pub mod primitive;
pub mod sequence;
pub mod status;
pub mod transport;
pub mod tree;
pub mod value;
