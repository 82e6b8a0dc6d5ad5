mod tests {
    use marquee_lights::api;
    use marquee_lights::http::PendingRequest;
    use marquee_lights::{Engine, EngineConfig, Layer, ShowKind};

    fn engine() -> Engine<64> {
        Engine::new(&EngineConfig::default()).unwrap()
    }

    fn call(engine: &mut Engine<64>, raw: &str) -> (u16, String) {
        let mut pending = PendingRequest::new();
        assert_eq!(pending.feed(raw.as_bytes()), Ok(true));
        let request = pending.request().unwrap();
        let response = api::handle(&request, engine);
        let body = String::from_utf8(response.body().to_vec()).unwrap();
        (response.status(), body)
    }

    fn post(path: &str, body: &str) -> String {
        format!(
            "POST {path} HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        )
    }

    fn get(target: &str) -> String {
        format!("GET {target} HTTP/1.1\r\nHost: lights\r\n\r\n")
    }

    #[test]
    fn test_event_starts_wipe() {
        let mut engine = engine();
        let (status, body) = call(&mut engine, &post("/api/event", r#"{"name":"movie-start"}"#));
        assert_eq!(status, 200);
        assert!(body.contains(r#""status":"ok""#), "{body}");
        assert!(body.contains(r#""show":"wipe""#), "{body}");

        engine.advance(1);
        assert_eq!(engine.layer(), Layer::Overlay);
        assert_eq!(engine.active_kind(), ShowKind::Wipe);
    }

    #[test]
    fn test_bogus_show_is_rejected() {
        let mut engine = engine();
        engine.advance(1);
        let before = engine.frame().to_vec();

        let (status, body) = call(&mut engine, &post("/api/show", r#"{"kind":"bogus"}"#));
        assert_eq!(status, 400);
        assert!(body.starts_with(r#"{"error":"InvalidShow""#), "{body}");

        assert_eq!(engine.idle_show().kind(), ShowKind::Twinkle);
        assert!(engine.timed_show().is_none());
        assert_eq!(engine.frame(), before.as_slice());
    }

    #[test]
    fn test_show_from_query() {
        let mut engine = engine();
        let (status, body) = call(&mut engine, &get("/api/show?name=marquee&seconds=8"));
        assert_eq!(status, 200);
        assert!(body.contains(r#""seconds":8"#), "{body}");
        assert_eq!(
            engine.timed_show().map(|show| show.kind()),
            Some(ShowKind::Marquee)
        );
    }

    #[test]
    fn test_show_with_colors() {
        let mut engine = engine();
        let (status, _) = call(
            &mut engine,
            &post("/api/show", r##"{"kind":"solid","colors":["#FF0000"],"speed":0.5}"##),
        );
        assert_eq!(status, 200);
        let frame = engine.advance(1);
        assert!(frame.iter().all(|c| c.r == 255 && c.g == 0 && c.b == 0));
        assert_eq!(engine.idle_show().speed(), 0.5);
    }

    #[test]
    fn test_show_parameter_errors() {
        let mut engine = engine();
        for body in [
            r#"{"kind":"wipe","seconds":0}"#,
            r#"{"kind":"wipe","speed":9.0}"#,
            r##"{"kind":"wipe","color":"#XYZ"}"##,
        ] {
            let (status, reply) = call(&mut engine, &post("/api/show", body));
            assert_eq!(status, 400, "{body}");
            assert!(reply.contains(r#""error":"InvalidParameter""#), "{reply}");
        }
    }

    #[test]
    fn test_malformed_body() {
        let mut engine = engine();
        for body in [r#"{"kind":"#, r#"{"seconds":3}"#] {
            let (status, reply) = call(&mut engine, &post("/api/show", body));
            assert_eq!(status, 400);
            assert!(reply.contains(r#""error":"MalformedRequest""#), "{reply}");
        }
    }

    #[test]
    fn test_unknown_event() {
        let mut engine = engine();
        let (status, body) = call(&mut engine, &get("/api/event?name=intermission"));
        assert_eq!(status, 400);
        assert!(body.contains(r#""error":"UnknownEvent""#));
    }

    #[test]
    fn test_unknown_routes() {
        let mut engine = engine();
        let (status, body) = call(&mut engine, &get("/api/reboot"));
        assert_eq!(status, 404);
        assert!(body.contains(r#""error":"UnknownRoute""#));

        let (status, _) = call(&mut engine, "DELETE /api/show HTTP/1.1\r\n\r\n");
        assert_eq!(status, 404);
        let (status, _) = call(&mut engine, &post("/", "{}"));
        assert_eq!(status, 404);
    }

    #[test]
    fn test_index_page() {
        let mut engine = engine();
        for target in ["/", "/index.html"] {
            let (status, body) = call(&mut engine, &get(target));
            assert_eq!(status, 200);
            assert!(body.contains("<html"));
        }
    }

    #[test]
    fn test_status() {
        let mut engine = engine();
        engine.advance(1);
        let (status, body) = call(&mut engine, &get("/api/status"));
        assert_eq!(status, 200);
        assert!(body.contains(r#""idle":"twinkle""#), "{body}");
        assert!(body.contains(r#""count":20"#), "{body}");
        assert!(body.contains(r#""show_active":false"#), "{body}");
        assert!(
            body.contains(r#""events":["movie-start","movie-pause","movie-stop","bulb-change"]"#),
            "{body}"
        );
    }

    #[test]
    fn test_progress_updates() {
        let mut engine = engine();
        let (status, body) = call(&mut engine, &get("/api/progress?pct=1.5&state=playing"));
        assert_eq!(status, 200);
        assert!(body.contains(r#""state":"playing""#));
        assert_eq!(engine.progress().fraction(), 1.0);

        engine.advance(1);
        assert_eq!(engine.layer(), Layer::Progress);

        let (status, _) = call(&mut engine, &post("/api/progress", r#"{"state":"stopped"}"#));
        assert_eq!(status, 200);
        engine.advance(1);
        assert_eq!(engine.layer(), Layer::Idle);

        let (status, body) = call(&mut engine, &get("/api/progress?pct=0.5&state=rewinding"));
        assert_eq!(status, 400);
        assert!(body.contains(r#""error":"InvalidParameter""#));
    }

    #[test]
    fn test_mode_config_power_demo() {
        let mut engine = engine();

        let (status, body) = call(&mut engine, &post("/api/mode", r#"{"name":"chase"}"#));
        assert_eq!(status, 200);
        assert!(body.contains(r#""idle":"marquee""#));
        assert_eq!(engine.idle_show().kind(), ShowKind::Marquee);

        let (status, _) = call(&mut engine, &get("/api/mode?name=nope"));
        assert_eq!(status, 400);

        let (status, _) = call(&mut engine, &post("/api/config", r#"{"brightness":0.25}"#));
        assert_eq!(status, 200);
        assert_eq!(engine.settings().brightness, 0.25);
        assert_eq!(engine.settings().speed, 1.0);

        let (status, _) = call(&mut engine, &post("/api/power", r#"{"on":false}"#));
        assert_eq!(status, 200);
        assert!(!engine.settings().enabled);
        let (status, _) = call(&mut engine, &get("/api/np_on"));
        assert_eq!(status, 200);
        assert!(engine.settings().enabled);

        let (status, body) = call(&mut engine, &get("/api/demo?on=1&interval=2"));
        assert_eq!(status, 200);
        assert!(body.contains(r#""demo":true"#));
        assert!(body.contains(r#""interval":5"#));
    }
}
