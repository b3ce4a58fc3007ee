// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod helpers;
pub mod result_api_test;
pub mod scraper_test;
pub mod transcript_repository_test;
