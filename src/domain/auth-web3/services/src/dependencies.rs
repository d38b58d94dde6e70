// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::CatalogBuilder;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn register_dependencies(b: &mut CatalogBuilder) {
    b.add::<Web3ChallengeMessageGeneratorDefault>();
    b.add::<Web3ChallengeServiceImpl>();
    b.add::<Web3SignatureVerifierImpl>();

    b.add::<GenerateChallengeUseCaseImpl>();
    b.add::<GenerateUserSessionUseCaseImpl>();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
