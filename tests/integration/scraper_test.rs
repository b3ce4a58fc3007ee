// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{build_scraper, StubPortal, COLLEGE_CODE, KNOWN_HTNO, SERVED_EXAM_CODE};
use resultrs::domain::models::hall_ticket::HallTicketNumber;
use resultrs::domain::models::transcript::ResultVariant;

#[tokio::test]
async fn test_scraper_assembles_transcript_over_http() {
    let portal = StubPortal::start().await;
    let scraper = build_scraper(&portal);
    let htno = HallTicketNumber::parse(KNOWN_HTNO).unwrap();

    let transcript = scraper.scrape(&htno).await.expect("transcript");

    assert_eq!(portal.hits(), 6);
    assert_eq!(transcript.blocks().len(), 1);

    let identity = transcript.identity();
    assert_eq!(identity.hall_ticket, KNOWN_HTNO);
    assert_eq!(identity.college_code, COLLEGE_CODE);

    let block = &transcript.blocks()[0];
    assert_eq!(block.semester, "1-1");
    assert!(block
        .subjects
        .iter()
        .all(|s| s.exam_code == SERVED_EXAM_CODE && s.attempt == ResultVariant::Regular));
}

#[tokio::test]
async fn test_scraper_returns_none_when_every_fetch_is_absent() {
    let portal = StubPortal::start().await;
    let scraper = build_scraper(&portal);
    let htno = HallTicketNumber::parse("21B81A1201").unwrap();

    assert!(scraper.scrape(&htno).await.is_none());
    assert_eq!(portal.hits(), 6);
}
