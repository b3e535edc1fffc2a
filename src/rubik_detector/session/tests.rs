#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;
    use std::sync::{Arc, Mutex};

    use crate::rubik_detector::common::error::DetectorError;
    use crate::rubik_detector::config::{DetectorConfig, DrawConfig, ImageProperties};
    use crate::rubik_detector::engine::{EngineHandle, VisionEngine};
    use crate::rubik_detector::layout::{DirectBuffer, FrameLayout, ScanPhase, compute_layout};
    use crate::rubik_detector::model::{Face, FaceletColor};
    use crate::rubik_detector::session::{Detection, Rejection, ScanSession, SessionState};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Initialize,
        Create { scan: (i32, i32, i32), photo: (i32, i32, i32), storage_path: Option<String> },
        SetProperties { is_photo: bool, rotation: i32, width: i32, height: i32 },
        SetPhase(bool),
        SetDrawConfig { draw_mode: i32, stroke_width: i32, fill_shape: bool },
        Scan(usize),
        Extract(usize, usize),
        Analyze(usize),
        Release,
    }

    struct MockEngine {
        calls: Arc<Mutex<Vec<Call>>>,
        scan: ImageProperties,
        photo: ImageProperties,
        phase: ScanPhase,
        fail_create: bool,
        scan_result: Option<Vec<i32>>,
        extract_result: bool,
        colors_result: Option<Vec<i32>>,
        reported_result_size: Arc<Mutex<Option<i32>>>,
    }

    impl MockEngine {
        fn new(calls: Arc<Mutex<Vec<Call>>>) -> Self {
            Self {
                calls,
                scan: props(0, 640, 480),
                photo: props(0, 1280, 960),
                phase: ScanPhase::FirstPhase,
                fail_create: false,
                scan_result: Some(white_facelets()),
                extract_result: true,
                colors_result: Some(solved_cube_state()),
                reported_result_size: Arc::new(Mutex::new(None)),
            }
        }

        fn log(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn layout(&self) -> FrameLayout {
            compute_layout(&self.scan, &self.photo, self.phase)
        }

        fn paint_result(&self, data: &mut [u8]) {
            if let Some(result) = self.layout().result_frame_mut(data) {
                result.fill(0xFF);
            }
        }
    }

    impl VisionEngine for MockEngine {
        fn initialize(&mut self) -> crate::rubik_detector::Result<()> {
            self.log(Call::Initialize);
            Ok(())
        }

        fn create(
            &mut self,
            scan_rotation: i32,
            scan_width: i32,
            scan_height: i32,
            photo_rotation: i32,
            photo_width: i32,
            photo_height: i32,
            _draw_mode: i32,
            _stroke_width: i32,
            _fill_shape: bool,
            storage_path: Option<&str>,
        ) -> Option<EngineHandle> {
            self.log(Call::Create {
                scan: (scan_rotation, scan_width, scan_height),
                photo: (photo_rotation, photo_width, photo_height),
                storage_path: storage_path.map(str::to_string),
            });
            if self.fail_create {
                return None;
            }
            self.scan = props(scan_rotation, scan_width, scan_height);
            self.photo = props(photo_rotation, photo_width, photo_height);
            NonZeroUsize::new(0x1000).map(EngineHandle::new)
        }

        fn release(&mut self, _handle: EngineHandle) {
            self.log(Call::Release);
        }

        fn set_properties(&mut self, _handle: EngineHandle, is_photo: bool, rotation: i32, width: i32, height: i32) {
            self.log(Call::SetProperties { is_photo, rotation, width, height });
            if is_photo {
                self.photo = props(rotation, width, height);
            } else {
                self.scan = props(rotation, width, height);
            }
        }

        fn set_phase(&mut self, _handle: EngineHandle, is_second_phase: bool) {
            self.log(Call::SetPhase(is_second_phase));
            self.phase = if is_second_phase { ScanPhase::SecondPhase } else { ScanPhase::FirstPhase };
        }

        fn set_draw_config(&mut self, _handle: EngineHandle, draw_mode: i32, stroke_width: i32, fill_shape: bool) {
            self.log(Call::SetDrawConfig { draw_mode, stroke_width, fill_shape });
        }

        fn scan(&mut self, _handle: EngineHandle, data: &mut [u8]) -> Option<Vec<i32>> {
            self.log(Call::Scan(data.len()));
            self.paint_result(data);
            self.scan_result.clone()
        }

        fn extract_facelets(&mut self, _handle: EngineHandle, scan_data: &mut [u8], photo_data: &mut [u8]) -> bool {
            self.log(Call::Extract(scan_data.len(), photo_data.len()));
            self.extract_result
        }

        fn analyze_colors(&mut self, _handle: EngineHandle, data: &mut [u8]) -> Option<Vec<i32>> {
            self.log(Call::Analyze(data.len()));
            self.colors_result.clone()
        }

        fn required_memory(&self, _handle: EngineHandle) -> i32 {
            self.layout().required_memory() as i32
        }

        fn input_offset(&self, _handle: EngineHandle) -> i32 {
            self.layout().input_offset() as i32
        }

        fn input_size(&self, _handle: EngineHandle) -> i32 {
            self.layout().input_byte_count() as i32
        }

        fn result_offset(&self, _handle: EngineHandle) -> i32 {
            self.layout().result_offset() as i32
        }

        fn result_size(&self, _handle: EngineHandle) -> i32 {
            self.reported_result_size
                .lock()
                .unwrap()
                .unwrap_or(self.layout().result_byte_count() as i32)
        }
    }

    fn props(rotation: i32, width: i32, height: i32) -> ImageProperties {
        ImageProperties::new(rotation, width, height).unwrap()
    }

    fn white_facelets() -> Vec<i32> {
        [5, 32_000_000, 24_000_000, 5_000_000, 5_000_000, 0].repeat(9)
    }

    fn solved_cube_state() -> Vec<i32> {
        let mut raw = vec![0; 54];
        for _ in 0..6 {
            raw.extend_from_slice(&[2_550_000, 1_280_000, 1_280_000]);
        }
        raw
    }

    fn test_config() -> DetectorConfig {
        DetectorConfig::builder()
            .scan_properties(props(0, 640, 480))
            .photo_properties(props(0, 1280, 960))
            .build()
    }

    fn open_session(engine: MockEngine) -> ScanSession<MockEngine> {
        ScanSession::with_engine(engine, test_config()).unwrap()
    }

    fn count(calls: &Arc<Mutex<Vec<Call>>>, wanted: &Call) -> usize {
        calls.lock().unwrap().iter().filter(|call| *call == wanted).count()
    }

    fn is_engine_op(call: &Call) -> bool {
        matches!(call, Call::Scan(_) | Call::Extract(..) | Call::Analyze(_))
    }

    #[test]
    fn test_session_starts_in_first_phase() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let session = open_session(MockEngine::new(calls.clone()));

        assert_eq!(session.state(), SessionState::Active(ScanPhase::FirstPhase));
        assert_eq!(
            *session.layout().unwrap(),
            compute_layout(&props(0, 640, 480), &props(0, 1280, 960), ScanPhase::FirstPhase)
        );
        let log = calls.lock().unwrap();
        assert_eq!(log[0], Call::Initialize);
        assert!(matches!(log[1], Call::Create { scan: (0, 640, 480), photo: (0, 1280, 960), storage_path: None }));
    }

    #[test]
    fn test_create_failure_is_an_error() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut engine = MockEngine::new(calls.clone());
        engine.fail_create = true;

        let result = ScanSession::with_engine(engine, test_config());
        assert!(matches!(result, Err(DetectorError::EngineError(_))));
        assert_eq!(count(&calls, &Call::Release), 0);
    }

    #[test]
    fn test_malformed_initial_layout_releases_context() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut engine = MockEngine::new(calls.clone());
        *engine.reported_result_size.lock().unwrap() = Some(-4);

        let result = ScanSession::with_engine(engine, test_config());
        assert!(matches!(result, Err(DetectorError::MalformedLayout(_))));
        assert_eq!(count(&calls, &Call::Release), 1);
    }

    #[test]
    fn test_scan_detects_face() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        let mut buffer = DirectBuffer::allocate(session.required_memory().unwrap());

        let grid = session.scan_cube(&mut buffer).unwrap().detected().unwrap();
        assert_eq!(grid[0][0].color, FaceletColor::White);
        assert!((grid[2][2].center.x - 320.0).abs() < 1e-3);
        assert!((grid[1][1].width - 50.0).abs() < 1e-3);

        let result = session.layout().unwrap().result_frame(&buffer).unwrap();
        assert!(result.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_scan_miss_is_not_an_error() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut engine = MockEngine::new(calls.clone());
        engine.scan_result = None;
        let mut session = open_session(engine);
        let mut buffer = DirectBuffer::allocate(session.required_memory().unwrap());

        assert_eq!(session.scan_cube(&mut buffer).unwrap(), Detection::Missed);
        assert_eq!(session.state(), SessionState::Active(ScanPhase::FirstPhase));
    }

    #[test]
    fn test_scan_capacity_boundary() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        let required = session.required_memory().unwrap();

        let mut short = DirectBuffer::allocate(required - 1);
        let outcome = session.scan_cube(&mut short).unwrap();
        assert_eq!(
            outcome,
            Detection::Rejected(Rejection::InsufficientCapacity { required, capacity: required - 1 })
        );
        assert!(short.iter().all(|&b| b == 0));
        assert_eq!(count(&calls, &Call::Scan(required - 1)), 0);

        let mut exact = DirectBuffer::allocate(required);
        assert!(session.scan_cube(&mut exact).unwrap().is_detected());
        assert_eq!(count(&calls, &Call::Scan(required)), 1);
    }

    #[test]
    fn test_scan_refuses_non_direct_buffer() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        let mut heap = vec![0u8; session.required_memory().unwrap()];

        assert!(matches!(session.scan_cube(&mut heap), Err(DetectorError::NonDirectBuffer)));
        assert!(!calls.lock().unwrap().iter().any(is_engine_op));

        // The byte-array entry point has no directness requirement
        assert!(session.scan_cube_bytes(&mut heap).unwrap().is_detected());
    }

    #[test]
    fn test_malformed_scan_result_is_an_error() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut engine = MockEngine::new(calls.clone());
        let mut raw = white_facelets();
        raw[6] = 9;
        engine.scan_result = Some(raw);
        let mut session = open_session(engine);
        let mut buffer = DirectBuffer::allocate(session.required_memory().unwrap());

        assert!(matches!(session.scan_cube(&mut buffer), Err(DetectorError::MalformedResult(_))));
    }

    #[test]
    fn test_extract_in_first_phase_is_rejected() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        let layout = *session.layout().unwrap();
        let mut scan = DirectBuffer::allocate(layout.required_memory());
        let mut photo = vec![0u8; layout.required_memory()];

        let outcome = session.extract_facelets(&mut scan, &mut photo).unwrap();
        assert_eq!(
            outcome,
            Detection::Rejected(Rejection::WrongPhase {
                required: ScanPhase::SecondPhase,
                current: ScanPhase::FirstPhase,
            })
        );
        assert_eq!(session.phase(), ScanPhase::FirstPhase);
        assert_eq!(*session.layout().unwrap(), layout);
        assert!(!calls.lock().unwrap().iter().any(is_engine_op));
    }

    #[test]
    fn test_scan_in_second_phase_is_rejected() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        let mut buffer = DirectBuffer::allocate(session.required_memory().unwrap());
        session.update_scan_phase(ScanPhase::SecondPhase).unwrap();

        let outcome = session.scan_cube(&mut buffer).unwrap();
        assert!(matches!(outcome.rejection(), Some(Rejection::WrongPhase { .. })));
    }

    #[test]
    fn test_two_phase_scan() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        let mut scan = DirectBuffer::allocate(session.required_memory().unwrap());
        assert!(session.scan_cube(&mut scan).unwrap().is_detected());

        session.update_scan_phase(ScanPhase::SecondPhase).unwrap();
        assert_eq!(session.state(), SessionState::Active(ScanPhase::SecondPhase));
        assert_eq!(
            *session.layout().unwrap(),
            compute_layout(&props(0, 640, 480), &props(0, 1280, 960), ScanPhase::SecondPhase)
        );
        assert_eq!(
            *session.scan_layout().unwrap(),
            compute_layout(&props(0, 640, 480), &props(0, 1280, 960), ScanPhase::FirstPhase)
        );

        let mut photo = DirectBuffer::allocate(session.required_memory().unwrap());
        assert_eq!(session.extract_facelets(&mut scan, &mut photo).unwrap(), Detection::Detected(()));

        let mut colors = DirectBuffer::allocate(session.required_memory_colors().unwrap());
        let state = session.analyze_colors(&mut colors).unwrap().detected().unwrap();
        assert!(state.facelets().iter().all(|&face| face == Face::Up));
        assert!(state.colors().iter().all(|&argb| argb == 0xFFFF_FFFF));

        session.update_scan_phase(ScanPhase::FirstPhase).unwrap();
        assert_eq!(session.state(), SessionState::Active(ScanPhase::FirstPhase));
        assert_eq!(count(&calls, &Call::SetPhase(true)), 1);
        assert_eq!(count(&calls, &Call::SetPhase(false)), 1);
    }

    #[test]
    fn test_extract_checks_both_buffers() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        let scan_required = session.required_memory().unwrap();
        session.update_scan_phase(ScanPhase::SecondPhase).unwrap();
        let photo_required = session.required_memory().unwrap();

        let mut short_scan = DirectBuffer::allocate(scan_required - 1);
        let mut photo = DirectBuffer::allocate(photo_required);
        assert_eq!(
            session.extract_facelets(&mut short_scan, &mut photo).unwrap().rejection(),
            Some(Rejection::InsufficientCapacity { required: scan_required, capacity: scan_required - 1 })
        );

        let mut scan = DirectBuffer::allocate(scan_required);
        let mut short_photo = vec![0u8; photo_required - 1];
        assert_eq!(
            session.extract_facelets(&mut scan, &mut short_photo).unwrap().rejection(),
            Some(Rejection::InsufficientCapacity { required: photo_required, capacity: photo_required - 1 })
        );

        let mut heap_scan = vec![0u8; scan_required];
        assert!(matches!(
            session.extract_facelets(&mut heap_scan, &mut photo),
            Err(DetectorError::NonDirectBuffer)
        ));
        assert!(!calls.lock().unwrap().iter().any(is_engine_op));
    }

    #[test]
    fn test_analyze_colors_capacity_boundary() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        session.update_scan_phase(ScanPhase::SecondPhase).unwrap();
        let required = session.required_memory_colors().unwrap();
        assert_eq!(required, 2 * session.layout().unwrap().result_byte_count());

        let mut short = DirectBuffer::allocate(required - 1);
        assert_eq!(
            session.analyze_colors(&mut short).unwrap().rejection(),
            Some(Rejection::InsufficientCapacity { required, capacity: required - 1 })
        );

        let mut exact = DirectBuffer::allocate(required);
        assert!(session.analyze_colors(&mut exact).unwrap().is_detected());
    }

    #[test]
    fn test_failed_color_analysis_is_a_miss() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut engine = MockEngine::new(calls.clone());
        engine.colors_result = None;
        engine.extract_result = false;
        let mut session = open_session(engine);
        let mut scan = DirectBuffer::allocate(session.required_memory().unwrap());
        session.update_scan_phase(ScanPhase::SecondPhase).unwrap();
        let mut photo = DirectBuffer::allocate(session.required_memory().unwrap().max(session.required_memory_colors().unwrap()));

        assert_eq!(session.extract_facelets(&mut scan, &mut photo).unwrap(), Detection::Missed);
        assert_eq!(session.analyze_colors(&mut photo).unwrap(), Detection::Missed);
    }

    #[test]
    fn test_property_updates_resync_layout() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));

        session.update_scan_properties(props(90, 1280, 720)).unwrap();
        assert_eq!(*session.scan_properties(), props(90, 1280, 720));
        assert_eq!(
            *session.layout().unwrap(),
            compute_layout(&props(90, 1280, 720), &props(0, 1280, 960), ScanPhase::FirstPhase)
        );

        session.update_photo_properties(props(270, 4032, 3024)).unwrap();
        assert_eq!(*session.photo_properties(), props(270, 4032, 3024));
        assert_eq!(
            count(&calls, &Call::SetProperties { is_photo: true, rotation: 270, width: 4032, height: 3024 }),
            1
        );
        assert_eq!(
            count(&calls, &Call::SetProperties { is_photo: false, rotation: 90, width: 1280, height: 720 }),
            1
        );
    }

    #[test]
    fn test_malformed_layout_update_is_an_error() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = MockEngine::new(calls.clone());
        let result_size = engine.reported_result_size.clone();
        let mut session = open_session(engine);
        let mut buffer = DirectBuffer::allocate(session.required_memory().unwrap());
        *result_size.lock().unwrap() = Some(i32::MAX);

        assert!(matches!(
            session.update_scan_properties(props(0, 1920, 1080)),
            Err(DetectorError::MalformedLayout(_))
        ));
        assert_eq!(session.layout(), None);
        assert_eq!(session.required_memory(), None);

        // A buffer sized for the previous layout must not reach the engine
        assert_eq!(
            session.scan_cube(&mut buffer).unwrap(),
            Detection::Rejected(Rejection::LayoutUnavailable)
        );
        assert!(!calls.lock().unwrap().iter().any(is_engine_op));

        *result_size.lock().unwrap() = None;
        session.update_scan_properties(props(0, 1920, 1080)).unwrap();
        let required = session.required_memory().unwrap();
        assert_eq!(
            session.scan_cube(&mut buffer).unwrap().rejection(),
            Some(Rejection::InsufficientCapacity { required, capacity: buffer.len() })
        );

        let mut resized = DirectBuffer::allocate(required);
        assert!(session.scan_cube(&mut resized).unwrap().is_detected());
    }

    #[test]
    fn test_malformed_phase_layout_rejects_second_phase_operations() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = MockEngine::new(calls.clone());
        let result_size = engine.reported_result_size.clone();
        let mut session = open_session(engine);
        let mut scan = DirectBuffer::allocate(session.required_memory().unwrap());
        *result_size.lock().unwrap() = Some(-1);

        assert!(session.update_scan_phase(ScanPhase::SecondPhase).is_err());
        assert_eq!(session.phase(), ScanPhase::SecondPhase);

        let mut photo = DirectBuffer::allocate(16 << 20);
        assert_eq!(
            session.extract_facelets(&mut scan, &mut photo).unwrap(),
            Detection::Rejected(Rejection::LayoutUnavailable)
        );
        assert_eq!(
            session.analyze_colors(&mut photo).unwrap(),
            Detection::Rejected(Rejection::LayoutUnavailable)
        );
        assert!(!calls.lock().unwrap().iter().any(is_engine_op));
    }

    #[test]
    fn test_scan_properties_change_during_second_phase() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        let mut scan = DirectBuffer::allocate(session.required_memory().unwrap());
        session.update_scan_phase(ScanPhase::SecondPhase).unwrap();
        let mut photo = DirectBuffer::allocate(session.required_memory().unwrap());

        session.update_scan_properties(props(0, 1920, 1080)).unwrap();
        assert_eq!(session.scan_layout(), None);
        assert!(session.layout().is_some());

        // The tracked detection belongs to the old scan resolution
        assert_eq!(
            session.extract_facelets(&mut scan, &mut photo).unwrap(),
            Detection::Rejected(Rejection::LayoutUnavailable)
        );
        assert!(!calls.lock().unwrap().iter().any(is_engine_op));

        session.update_scan_phase(ScanPhase::FirstPhase).unwrap();
        let scan_layout = compute_layout(&props(0, 1920, 1080), &props(0, 1280, 960), ScanPhase::FirstPhase);
        assert_eq!(session.scan_layout(), Some(&scan_layout));

        let mut rescan = DirectBuffer::allocate(scan_layout.required_memory());
        assert!(session.scan_cube(&mut rescan).unwrap().is_detected());
        session.update_scan_phase(ScanPhase::SecondPhase).unwrap();

        assert_eq!(
            session.extract_facelets(&mut scan, &mut photo).unwrap().rejection(),
            Some(Rejection::InsufficientCapacity {
                required: scan_layout.required_memory(),
                capacity: scan.len(),
            })
        );
        assert!(session.extract_facelets(&mut rescan, &mut photo).unwrap().is_detected());
    }

    #[test]
    fn test_draw_config_update() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));

        session.update_draw_config(DrawConfig::rectangles());
        assert_eq!(*session.draw_config(), DrawConfig::rectangles());
        assert_eq!(
            count(&calls, &Call::SetDrawConfig { draw_mode: 1, stroke_width: 3, fill_shape: false }),
            1
        );
    }

    #[test]
    fn test_operations_after_release_are_rejected() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));
        let layout = *session.layout().unwrap();
        let mut buffer = DirectBuffer::allocate(session.required_memory().unwrap());
        buffer.fill(0x5A);

        session.release();
        assert_eq!(session.state(), SessionState::Released);

        assert_eq!(session.scan_cube(&mut buffer).unwrap(), Detection::Rejected(Rejection::Released));
        assert_eq!(session.scan_cube_bytes(&mut buffer).unwrap(), Detection::Rejected(Rejection::Released));
        let mut photo = vec![0x5Au8; 16];
        assert_eq!(
            session.extract_facelets(&mut buffer, &mut photo).unwrap(),
            Detection::Rejected(Rejection::Released)
        );
        assert_eq!(session.analyze_colors(&mut buffer).unwrap(), Detection::Rejected(Rejection::Released));

        // Rejection also wins over the directness check
        let mut heap = vec![0u8; 16];
        assert_eq!(session.scan_cube(&mut heap).unwrap(), Detection::Rejected(Rejection::Released));

        session.update_scan_phase(ScanPhase::SecondPhase).unwrap();
        session.update_scan_properties(props(0, 320, 240)).unwrap();
        session.update_draw_config(DrawConfig::do_not_draw());
        assert_eq!(session.state(), SessionState::Released);
        assert_eq!(*session.layout().unwrap(), layout);

        assert!(buffer.iter().all(|&b| b == 0x5A));
        assert!(photo.iter().all(|&b| b == 0x5A));
        let log = calls.lock().unwrap();
        assert_eq!(log.last(), Some(&Call::Release));
        assert!(!log.iter().any(is_engine_op));
    }

    #[test]
    fn test_release_is_idempotent() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut session = open_session(MockEngine::new(calls.clone()));

        session.release();
        session.release();
        drop(session);
        assert_eq!(count(&calls, &Call::Release), 1);
    }

    #[test]
    fn test_drop_releases_context() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        {
            let _session = open_session(MockEngine::new(calls.clone()));
        }
        assert_eq!(count(&calls, &Call::Release), 1);
    }

    #[test]
    fn test_storage_path_reaches_engine() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let config = DetectorConfig::builder()
            .scan_properties(props(0, 640, 480))
            .photo_properties(props(0, 1280, 960))
            .image_save_path(Some("/tmp/rubik-frames".into()))
            .build();
        let _session = ScanSession::with_engine(MockEngine::new(calls.clone()), config).unwrap();

        let log = calls.lock().unwrap();
        assert!(matches!(
            &log[1],
            Call::Create { storage_path: Some(path), .. } if path == "/tmp/rubik-frames"
        ));
    }

    #[test]
    fn test_debuggable_session_keeps_statistics() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut engine = MockEngine::new(calls.clone());
        engine.scan_result = None;
        let config = DetectorConfig::builder()
            .scan_properties(props(0, 640, 480))
            .photo_properties(props(0, 1280, 960))
            .debuggable(true)
            .build();
        let mut session = ScanSession::with_engine(engine, config).unwrap();
        let mut buffer = DirectBuffer::allocate(session.required_memory().unwrap());

        session.scan_cube(&mut buffer).unwrap();
        session.scan_cube(&mut buffer).unwrap();
        let stats = session.statistics().unwrap();
        assert_eq!(stats.frames(), 2);
        assert_eq!(stats.detections(), 0);
        assert!(stats.last_latency().is_some());

        assert!(open_session(MockEngine::new(calls.clone())).statistics().is_none());
    }

    #[test]
    fn test_statistics_count_frames_with_malformed_results() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut engine = MockEngine::new(calls.clone());
        engine.scan_result = Some(vec![0; 10]);
        let config = DetectorConfig::builder()
            .scan_properties(props(0, 640, 480))
            .photo_properties(props(0, 1280, 960))
            .debuggable(true)
            .build();
        let mut session = ScanSession::with_engine(engine, config).unwrap();
        let mut buffer = DirectBuffer::allocate(session.required_memory().unwrap());

        assert!(matches!(session.scan_cube(&mut buffer), Err(DetectorError::MalformedResult(_))));
        let stats = session.statistics().unwrap();
        assert_eq!(stats.frames(), 1);
        assert_eq!(stats.detections(), 0);
    }
}
