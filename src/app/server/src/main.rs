// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


#[tokio::main]
async fn main() {
    let matches = sigauth_server::cli().get_matches();

    if let Err(err) = sigauth_server::run(matches).await {
        eprintln!("Error: {}", err.reason());
        std::process::exit(1);
    }
}
