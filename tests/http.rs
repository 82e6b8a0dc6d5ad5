mod tests {
    use embedded_io::{SliceWriteError, WriteFmtError};
    use marquee_lights::Error;
    use marquee_lights::api::query::{FromQuery, decode_component};
    use marquee_lights::api::dto::ShowParams;
    use marquee_lights::http::{
        BODY_BUFFER_SIZE, HEADER_BUFFER_SIZE, HttpMethod, PendingRequest, Response,
        reason_phrase,
    };

    fn complete(raw: &[u8]) -> PendingRequest {
        let mut pending = PendingRequest::new();
        assert_eq!(pending.feed(raw), Ok(true));
        pending
    }

    #[test]
    fn test_parse_get_with_query() {
        let pending = complete(b"GET /api/event?name=movie_start HTTP/1.1\r\nHost: x\r\n\r\n");
        let request = pending.request().unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/api/event");
        assert_eq!(request.query, Some("name=movie_start"));
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_parse_post_body() {
        let raw = b"POST /api/show HTTP/1.1\r\ncontent-length: 16\r\n\r\n{\"kind\":\"wipe\"}\n";
        let pending = complete(raw);
        let request = pending.request().unwrap();
        assert_eq!(request.route(), (HttpMethod::Post, "/api/show"));
        assert_eq!(request.query, None);
        assert_eq!(request.body, b"{\"kind\":\"wipe\"}\n");
    }

    #[test]
    fn test_incremental_feed() {
        let raw: &[u8] = b"POST /api/progress HTTP/1.0\r\nContent-Length: 11\r\n\r\n{\"pct\":0.5}";
        let mut pending = PendingRequest::new();
        for (i, byte) in raw.iter().enumerate() {
            let done = pending.feed(core::slice::from_ref(byte)).unwrap();
            assert_eq!(done, i == raw.len() - 1);
        }
        assert_eq!(pending.request().unwrap().body, b"{\"pct\":0.5}");
    }

    #[test]
    fn test_incomplete_request_has_no_request() {
        let mut pending = PendingRequest::new();
        assert_eq!(pending.feed(b"GET /api/status HTTP/1.1\r\n"), Ok(false));
        assert!(pending.request().is_none());
    }

    #[test]
    fn test_rejects_malformed_request_line() {
        for raw in [
            &b"BREW /pot HTTP/1.1\r\n\r\n"[..],
            b"GET\r\n\r\n",
            b"GET / SPDY/3\r\n\r\n",
        ] {
            let mut pending = PendingRequest::new();
            assert!(matches!(
                pending.feed(raw),
                Err(Error::MalformedRequest(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_content_length() {
        let mut pending = PendingRequest::new();
        assert!(matches!(
            pending.feed(b"POST /api/show HTTP/1.1\r\nContent-Length: lots\r\n\r\n"),
            Err(Error::MalformedRequest(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_body() {
        let mut pending = PendingRequest::new();
        let head = format!(
            "POST /api/show HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            BODY_BUFFER_SIZE + 1
        );
        assert!(matches!(
            pending.feed(head.as_bytes()),
            Err(Error::MalformedRequest(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_headers() {
        let mut pending = PendingRequest::new();
        let mut raw = b"GET / HTTP/1.1\r\nX-Filler: ".to_vec();
        raw.resize(HEADER_BUFFER_SIZE + 1, b'a');
        assert!(matches!(
            pending.feed(&raw),
            Err(Error::MalformedRequest(_))
        ));
    }

    #[test]
    fn test_response_bytes() {
        let response = Response::error(Error::UnknownRoute);
        assert_eq!(response.status(), 404);
        let mut out = Vec::new();
        response.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with(r#"{"error":"UnknownRoute","message":"unknown route"}"#));
        let body = r#"{"error":"UnknownRoute","message":"unknown route"}"#;
        assert!(text.contains(&format!("Content-Length: {}\r\n", body.len())));
    }

    #[test]
    fn test_response_write_failure_is_reported() {
        let response = Response::error(Error::UnknownEvent);
        let mut buf = [0u8; 16];
        let mut out: &mut [u8] = &mut buf;
        assert_eq!(
            response.write_to(&mut out),
            Err(WriteFmtError::Other(SliceWriteError::Full))
        );
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(reason_phrase(200), "OK");
        assert_eq!(reason_phrase(400), "Bad Request");
        assert_eq!(reason_phrase(408), "Request Timeout");
        assert_eq!(reason_phrase(500), "Internal Server Error");

        let errors = [
            Error::InvalidShow,
            Error::InvalidParameter("x"),
            Error::MalformedRequest("x"),
            Error::UnknownRoute,
            Error::UnknownEvent,
            Error::RequestTimeout,
            Error::HardwareWriteFailure,
            Error::Internal,
        ];
        for error in errors {
            assert_ne!(reason_phrase(error.status_code()), "Unknown", "{error}");
        }
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("movie_start").unwrap().as_str(), "movie_start");
        assert_eq!(decode_component("%23FF8C14").unwrap().as_str(), "#FF8C14");
        assert_eq!(decode_component("a+b").unwrap().as_str(), "a b");
        assert!(decode_component("%2").is_err());
        assert!(decode_component("%zz").is_err());
    }

    #[test]
    fn test_show_params_from_query() {
        let params =
            ShowParams::from_query(Some("name=wipe&seconds=8&speed=1.5&colors=%23FF0000,00FF00"))
                .unwrap();
        assert_eq!(params.kind.as_deref(), Some("wipe"));
        assert_eq!(params.seconds, Some(8));
        assert_eq!(params.speed, Some(1.5));
        assert_eq!(params.palette().unwrap().len(), 2);

        assert!(matches!(
            ShowParams::from_query(Some("kind=wipe&seconds=soon")),
            Err(Error::InvalidParameter(_))
        ));
        assert!(ShowParams::from_query(None).unwrap().kind.is_none());
    }
}
