extern crate deferred_gl;
extern crate gl;

use deferred_gl::video::errors::Error;
use deferred_gl::video::prelude::*;

fn color_texture(video: &mut VideoSystem<HeadlessDevice>, width: u32, height: u32) -> TextureHandle {
    let params = TextureParams {
        kind: TextureKind::Color2D {
            format: ColorFormat::RGBA8,
            mipmapping: false,
            gamma_correction: false,
        },
        width,
        height,
    };

    video.create_texture(&params, None).unwrap()
}

fn depth_texture(video: &mut VideoSystem<HeadlessDevice>, width: u32, height: u32) -> TextureHandle {
    let params = TextureParams {
        kind: TextureKind::Depth2D { comparable: true },
        width,
        height,
    };

    video.create_texture(&params, None).unwrap()
}

#[test]
fn programs() {
    let mut video = VideoSystem::new(HeadlessDevice::new(), VideoParams::default());
    let program = video
        .create_program(
            &ProgramParams::new("vs", "fs")
                .with_texture_binding("u_albedo", 0)
                .with_uniform_binding("Camera", 0),
        )
        .unwrap();

    let location = video.uniform_location(program, "u_model").unwrap();
    assert_eq!(video.uniform_location(program, "u_model"), Some(location));
    assert_ne!(video.uniform_location(program, "u_view"), Some(location));

    video.delete_program(program).unwrap();
    assert!(video.uniform_location(program, "u_model").is_none());
    assert!(match video.delete_program(program) {
        Err(Error::ProgramHandleInvalid(v)) => v == program,
        _ => false,
    });
}

#[test]
fn buffers() {
    let mut video = VideoSystem::new(HeadlessDevice::new(), VideoParams::default());

    let params = BufferParams::new(BufferKind::Vertex, 4);
    assert!(match video.create_buffer(&params, Some(&[0; 8][..])) {
        Err(Error::BufferDataOutOfBounds(8, 4)) => true,
        _ => false,
    });

    let buffer = video.create_buffer(&params, Some(&[0; 2][..])).unwrap();
    assert_eq!(
        video.device().calls().last(),
        Some(&Call::CreateBuffer(1, gl::ARRAY_BUFFER, 4))
    );

    video.delete_buffer(buffer).unwrap();
    assert!(video.delete_buffer(buffer).is_err());
}

#[test]
fn textures() {
    let mut video = VideoSystem::new(HeadlessDevice::new(), VideoParams::default());

    let mut params = TextureParams {
        kind: TextureKind::Color2D {
            format: ColorFormat::RGBA16F,
            mipmapping: true,
            gamma_correction: false,
        },
        width: 4,
        height: 2,
    };

    assert!(match video.create_texture(&params, Some(&[0; 32][..])) {
        Err(Error::TextureDataMismatch(32, 64)) => true,
        _ => false,
    });

    let texture = video.create_texture(&params, Some(&[0; 64][..])).unwrap();
    assert_eq!(video.texture(texture), Some(params));

    params.width = 0;
    assert!(video.create_texture(&params, None).is_err());

    params.width = video.limits().max_texture_size + 1;
    assert!(video.create_texture(&params, None).is_err());

    video.delete_texture(texture).unwrap();
    assert!(video.texture(texture).is_none());
}

#[test]
fn framebuffers() {
    let mut video = VideoSystem::new(HeadlessDevice::new(), VideoParams::default());

    let c0 = color_texture(&mut video, 64, 64);
    let c1 = color_texture(&mut video, 64, 64);
    let depth = depth_texture(&mut video, 64, 64);

    let mut params = FramebufferParams::with_colors(&[c0, c1]).unwrap();
    params.depth = Some(depth);
    params.label = "gbuffer".into();

    let fb = video.create_framebuffer(&params).unwrap();
    assert_eq!(video.active_draw_buffers(fb), Some([true, true, false, false]));
    assert_eq!(
        video.active_draw_buffers(video.default_framebuffer()),
        Some([true, false, false, false])
    );

    video.delete_framebuffer(fb).unwrap();
    assert!(match video.delete_framebuffer(fb) {
        Err(Error::FramebufferHandleInvalid(v)) => v == fb,
        _ => false,
    });

    let default = video.default_framebuffer();
    assert!(match video.delete_framebuffer(default) {
        Err(Error::DeleteDefaultFramebuffer) => true,
        _ => false,
    });

    assert!(FramebufferParams::with_colors(&[c0; 5]).is_none());
}

#[test]
fn incompatible_attachments() {
    let mut video = VideoSystem::new(HeadlessDevice::new(), VideoParams::default());

    let color = color_texture(&mut video, 64, 64);
    let small = color_texture(&mut video, 32, 32);
    let depth = depth_texture(&mut video, 64, 64);

    let params = FramebufferParams::with_colors(&[color, small]).unwrap();
    assert!(match video.create_framebuffer(&params) {
        Err(Error::IncompatibleAttachment(_)) => true,
        _ => false,
    });

    let params = FramebufferParams::with_colors(&[depth]).unwrap();
    assert!(match video.create_framebuffer(&params) {
        Err(Error::IncompatibleAttachment(_)) => true,
        _ => false,
    });

    let mut params = FramebufferParams::with_colors(&[color]).unwrap();
    params.stencil = Some(depth);
    assert!(match video.create_framebuffer(&params) {
        Err(Error::IncompatibleAttachment(_)) => true,
        _ => false,
    });

    video.delete_texture(color).unwrap();
    let params = FramebufferParams::with_colors(&[color]).unwrap();
    assert!(match video.create_framebuffer(&params) {
        Err(Error::TextureHandleInvalid(v)) => v == color,
        _ => false,
    });
}

#[test]
fn color_attachments_limit() {
    let limits = Limits {
        max_color_attachments: 2,
        ..Limits::default()
    };

    let mut video = VideoSystem::new(HeadlessDevice::with_limits(limits), VideoParams::default());
    let textures: Vec<_> = (0..3).map(|_| color_texture(&mut video, 8, 8)).collect();

    let params = FramebufferParams::with_colors(&textures).unwrap();
    assert!(match video.create_framebuffer(&params) {
        Err(Error::TooManyColorAttachments(3)) => true,
        _ => false,
    });

    let params = FramebufferParams::with_colors(&textures[..2]).unwrap();
    assert!(video.create_framebuffer(&params).is_ok());
}

#[test]
fn vertex_arrays() {
    let mut video = VideoSystem::new(HeadlessDevice::new(), VideoParams::default());
    let vbo = video
        .create_buffer(&BufferParams::new(BufferKind::Vertex, 64), None)
        .unwrap();

    let mut params = VertexArrayParams::default();
    params.attributes.push(VertexAttribute {
        binding: 0,
        location: 3,
        format: VertexAttributeFormat::RG16F,
        offset: 0,
    });

    assert!(match video.create_vertex_array(&params) {
        Err(Error::VertexAttributeUnbound(3)) => true,
        _ => false,
    });

    params.bindings.push(VertexBufferBinding {
        buffer: vbo,
        stride: 4,
    });

    params.index_buffer = Some(BufferHandle::nil());
    assert!(match video.create_vertex_array(&params) {
        Err(Error::BufferHandleInvalid(_)) => true,
        _ => false,
    });

    params.index_buffer = None;
    let vao = video.create_vertex_array(&params).unwrap();
    video.delete_vertex_array(vao).unwrap();
    assert!(video.delete_vertex_array(vao).is_err());
}

#[test]
fn pipelines() {
    let mut video = VideoSystem::new(HeadlessDevice::new(), VideoParams::default());
    let program = video.create_program(&ProgramParams::new("vs", "fs")).unwrap();
    let vao = video.create_vertex_array(&VertexArrayParams::default()).unwrap();

    let mut info = PipelineInfo::new(program, vao);
    info.state = PipelineState::from_json(
        r#"{
            "topology": "LineList",
            "culling": "Front",
            "front_face": "Clockwise",
            "depth_comparison": "LessOrEqual",
            "blend_enabled": true,
            "blend_op_color": "ReverseSubtract",
            "blend_source_color_factor": "SourceAlpha",
            "blend_destination_color_factor": "OneMinusSourceAlpha"
        }"#,
    )
    .unwrap();

    let handle = video.create_pipeline(&info).unwrap();
    let pipeline = *video.pipeline(handle).unwrap();

    assert_eq!(pipeline.program, 1);
    assert_eq!(pipeline.topology, gl::LINES);
    assert!(pipeline.cull_test);
    assert_eq!(pipeline.cull_face, gl::FRONT);
    assert_eq!(pipeline.front_face, gl::CW);
    assert_eq!(pipeline.depth_comparison, gl::LEQUAL);
    assert_eq!(pipeline.blend_equation.mode_rgb, gl::FUNC_REVERSE_SUBTRACT);
    assert_eq!(pipeline.blend_equation.mode_alpha, gl::FUNC_ADD);
    assert_eq!(pipeline.blend_func.source_rgb, gl::SRC_ALPHA);
    assert_eq!(pipeline.blend_func.destination_rgb, gl::ONE_MINUS_SRC_ALPHA);
    assert_eq!(pipeline.stencil_op_front.face, gl::FRONT);
    assert_eq!(pipeline.stencil_op_back.face, gl::BACK);
    assert_eq!(pipeline.vertex_array.vertex_array, 2);
    assert_eq!(pipeline.vertex_array.index_type, gl::UNSIGNED_SHORT);

    video.delete_program(program).unwrap();
    assert!(match video.create_pipeline(&info) {
        Err(Error::ProgramHandleInvalid(v)) => v == program,
        _ => false,
    });

    // Existing pipelines keep their resolved values.
    assert!(video.pipeline(handle).is_some());
    video.delete_pipeline(handle).unwrap();
    assert!(video.pipeline(handle).is_none());
    assert!(video.delete_pipeline(handle).is_err());
}

#[test]
fn fences() {
    let mut video = VideoSystem::new(HeadlessDevice::new(), VideoParams::default());

    let f1 = video.track_submitted_work_done();
    let f2 = video.track_submitted_work_done();
    assert_eq!(video.fence_status(f1).unwrap(), FenceStatus::NotReady);

    video.device_mut().signal_fence(f1, FenceStatus::Success);
    assert!(video.fence_status(f1).unwrap().is_done());
    assert_eq!(video.fence_status(f2).unwrap(), FenceStatus::NotReady);

    video.device_mut().signal_fence(f2, FenceStatus::DeviceLost);
    assert_eq!(video.fence_status(f2).unwrap(), FenceStatus::DeviceLost);

    video.delete_fence(f1).unwrap();
    assert!(video.fence_status(f1).is_err());
    assert!(video.delete_fence(f1).is_err());
    assert!(video.fence_status(f2).is_ok());
}
