// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    calcli_cli::run().await
}
