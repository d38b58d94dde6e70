// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod api_key_repository_test_suite;
mod session_repository_test_suite;
mod user_repository_test_suite;

pub use api_key_repository_test_suite::*;
pub use session_repository_test_suite::*;
pub use user_repository_test_suite::*;

pub(crate) mod helpers;
