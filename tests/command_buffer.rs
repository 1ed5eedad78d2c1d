extern crate deferred_gl;
extern crate rand;

use std::fmt::Debug;

use rand::Rng;

use deferred_gl::utils::handle::Handle;
use deferred_gl::video::command::*;
use deferred_gl::video::pipeline::*;
use deferred_gl::video::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Record {
    Draw(Draw),
    Uniform4f(Uniform4f),
    Matrix(UniformMatrix4f),
    Update(UpdateBufferData, Vec<u8>),
}

fn random_records(len: usize) -> Vec<Record> {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| match rng.gen_range(0..4) {
            0 => Record::Draw(Draw {
                vertex_offset: rng.gen(),
                vertex_count: rng.gen(),
                instance_count: rng.gen(),
            }),
            1 => Record::Uniform4f(Uniform4f {
                location: rng.gen(),
                values: [rng.gen(), rng.gen(), rng.gen(), rng.gen()],
            }),
            2 => {
                let mut values = [0.0; 16];
                for v in values.iter_mut() {
                    *v = rng.gen();
                }

                Record::Matrix(UniformMatrix4f {
                    location: rng.gen(),
                    values,
                })
            }
            _ => {
                let bytes: Vec<u8> = (0..rng.gen_range(0..300)).map(|_| rng.gen()).collect();
                let cmd = UpdateBufferData {
                    buffer: BufferHandle::nil(),
                    offset: rng.gen(),
                    count: bytes.len() as u32,
                };

                Record::Update(cmd, bytes)
            }
        })
        .collect()
}

fn encode(buf: &mut CommandBuffer, records: &[Record]) {
    for v in records {
        match v {
            Record::Draw(cmd) => {
                buf.push_command(&Header { kind: Kind::Draw });
                buf.push_command(cmd);
            }
            Record::Uniform4f(cmd) => {
                buf.push_command(&Header {
                    kind: Kind::Uniform4f,
                });
                buf.push_command(cmd);
            }
            Record::Matrix(cmd) => {
                buf.push_command(&Header {
                    kind: Kind::UniformMatrix4f,
                });
                buf.push_command(cmd);
            }
            Record::Update(cmd, bytes) => {
                buf.push_command(&Header {
                    kind: Kind::UpdateBufferData,
                });
                buf.push_command(cmd);
                buf.push_data(bytes);
            }
        }
    }
}

fn decode(buf: &mut CommandBuffer) -> Vec<Record> {
    let mut records = Vec::new();
    while buf.has_more_commands() {
        let header: Header = buf.pop_command();
        let v = match header.kind {
            Kind::Draw => Record::Draw(buf.pop_command()),
            Kind::Uniform4f => Record::Uniform4f(buf.pop_command()),
            Kind::UniformMatrix4f => Record::Matrix(buf.pop_command()),
            Kind::UpdateBufferData => {
                let cmd: UpdateBufferData = buf.pop_command();
                let bytes = buf.pop_data(cmd.count as usize).to_vec();
                Record::Update(cmd, bytes)
            }
            kind => panic!("Unexpected {:?}.", kind),
        };

        records.push(v);
    }

    records
}

#[test]
fn roundtrip_advances_by_size() {
    let mut buf = CommandBuffer::default();
    let cmd = UniformBufferUnitRange {
        index: 3,
        buffer: BufferHandle::nil(),
        offset: 256,
        size: 64,
    };

    buf.push_command(&cmd);
    assert_eq!(buf.len(), UniformBufferUnitRange::SIZE);

    let v: UniformBufferUnitRange = buf.pop_command();
    assert_eq!(v, cmd);
    assert!(buf.is_empty());
    assert!(!buf.has_more_commands());
}

/// Pushes `cmd` behind its header, and pops both back from a buffer that
/// already holds unrelated bytes.
fn roundtrip<T: Command + Debug + PartialEq>(cmd: T) {
    let mut buf = CommandBuffer::new(0);
    buf.push_data(&[0xAB; 5]);
    let _ = buf.pop_data(5);

    let len = buf.len();
    buf.push_command(&Header { kind: T::KIND });
    buf.push_command(&cmd);
    assert_eq!(buf.len() - len, Header::SIZE + T::SIZE);

    let header: Header = buf.pop_command();
    assert_eq!(header.kind, T::KIND);

    let before = buf.len();
    let v: T = buf.pop_command();
    assert_eq!(before - buf.len(), T::SIZE);
    assert_eq!(v, cmd);
    assert!(!buf.has_more_commands());
}

fn handle<T: From<Handle>>(rng: &mut impl Rng) -> T {
    T::from(Handle::new(rng.gen_range(0..1024), rng.gen_range(0..512) * 2 + 1))
}

fn stencil_op(rng: &mut impl Rng, face: u32) -> StencilOp {
    StencilOp {
        face,
        stencil_fail: rng.gen(),
        depth_fail: rng.gen(),
        pass: rng.gen(),
    }
}

fn stencil_func(rng: &mut impl Rng, face: u32) -> StencilFunc {
    StencilFunc {
        face,
        func: rng.gen(),
        reference: rng.gen(),
        mask: rng.gen(),
    }
}

#[test]
fn every_kind_roundtrips() {
    let mut rng = rand::thread_rng();

    roundtrip(CopyFramebufferToBuffer {
        buffer: handle(&mut rng),
        x: rng.gen(),
        y: rng.gen(),
        width: rng.gen(),
        height: rng.gen(),
        format: rng.gen(),
        xtype: rng.gen(),
        buffer_offset: rng.gen(),
    });

    roundtrip(CopyFramebufferToTexture {
        texture: handle(&mut rng),
        texture_level: rng.gen(),
        texture_x: rng.gen(),
        texture_y: rng.gen(),
        framebuffer_x: rng.gen(),
        framebuffer_y: rng.gen(),
        width: rng.gen(),
        height: rng.gen(),
        generate_mipmaps: rng.gen(),
    });

    roundtrip(SetViewport {
        x: rng.gen(),
        y: rng.gen(),
        width: rng.gen(),
        height: rng.gen(),
    });

    roundtrip(BindPipeline {
        pipeline: Pipeline {
            program: rng.gen(),
            topology: rng.gen(),
            cull_test: rng.gen(),
            cull_face: rng.gen(),
            front_face: rng.gen(),
            depth_test: rng.gen(),
            depth_write: rng.gen(),
            depth_comparison: rng.gen(),
            stencil_test: rng.gen(),
            stencil_op_front: stencil_op(&mut rng, 1028),
            stencil_op_back: stencil_op(&mut rng, 1029),
            stencil_func_front: stencil_func(&mut rng, 1028),
            stencil_func_back: stencil_func(&mut rng, 1029),
            stencil_mask_front: StencilMask {
                face: 1028,
                mask: rng.gen(),
            },
            stencil_mask_back: StencilMask {
                face: 1029,
                mask: rng.gen(),
            },
            color_write: [rng.gen(), rng.gen(), rng.gen(), rng.gen()],
            blend_enabled: rng.gen(),
            blend_color: [rng.gen(), -0.5, rng.gen(), 1.0],
            blend_equation: BlendEquation {
                mode_rgb: rng.gen(),
                mode_alpha: rng.gen(),
            },
            blend_func: BlendFunc {
                source_rgb: rng.gen(),
                destination_rgb: rng.gen(),
                source_alpha: rng.gen(),
                destination_alpha: rng.gen(),
            },
            vertex_array: VertexArrayBinding {
                vertex_array: rng.gen(),
                index_type: rng.gen(),
            },
        },
    });

    roundtrip(Uniform1f {
        location: rng.gen(),
        value: rng.gen(),
    });

    roundtrip(Uniform1i {
        location: rng.gen(),
        value: rng.gen(),
    });

    roundtrip(Uniform3f {
        location: rng.gen(),
        values: [rng.gen(), f32::MAX, rng.gen()],
    });

    roundtrip(UniformBufferUnit {
        index: rng.gen(),
        buffer: handle(&mut rng),
    });

    roundtrip(TextureUnit {
        index: rng.gen(),
        texture: handle(&mut rng),
    });

    roundtrip(SamplerUnit {
        index: rng.gen(),
        sampler: handle(&mut rng),
    });

    roundtrip(DrawIndexed {
        index_byte_offset: rng.gen(),
        index_count: rng.gen(),
        instance_count: rng.gen(),
    });

    roundtrip(Draw {
        vertex_offset: rng.gen(),
        vertex_count: rng.gen(),
        instance_count: rng.gen(),
    });

    roundtrip(EndRenderPass {});
}

#[test]
fn fifo() {
    let records = random_records(64);
    let mut buf = CommandBuffer::new(64 * 1024);
    encode(&mut buf, &records);
    assert_eq!(decode(&mut buf), records);
}

#[test]
fn growth_is_transparent() {
    let records = random_records(256);

    let mut large = CommandBuffer::new(1024 * 1024);
    encode(&mut large, &records);

    let mut small = CommandBuffer::new(0);
    encode(&mut small, &records);

    assert!(small.capacity() > 1024);
    assert_eq!(small.len(), large.len());
    assert_eq!(decode(&mut small), decode(&mut large));
}

#[test]
fn reset_and_reuse() {
    let mut buf = CommandBuffer::new(0);

    for _ in 0..4 {
        let records = random_records(32);
        encode(&mut buf, &records);
        assert!(buf.has_more_commands());
        assert_eq!(decode(&mut buf), records);

        buf.reset();
        assert!(!buf.has_more_commands());
        assert!(buf.is_empty());
    }
}

#[test]
fn encoded_render_pass() {
    let mut buf = CommandBuffer::default();
    let mut info = RenderPassInfo::new(FramebufferHandle::nil(), Viewport::new(0, 0, 640, 480));
    info.colors[0].load_op = LoadOperation::Clear;
    info.colors[0].clear_value = [0.0, 0.5, 1.0, 1.0];
    info.depth_store_op = StoreOperation::DontCare;

    buf.begin_render_pass(&info);
    buf.draw(0, 3, 1);
    buf.sampler_unit(2, None);
    buf.end_render_pass();
    buf.update_buffer_data(BufferHandle::nil(), 8, &[1, 2, 3]);

    let header: Header = buf.pop_command();
    assert_eq!(header.kind, Kind::BeginRenderPass);
    let begin: BeginRenderPass = buf.pop_command();
    assert_eq!(begin.viewport_width, 640);
    assert_eq!(begin.colors[0].load_op, LoadOperation::Clear);
    assert_eq!(begin.colors[0].clear_value, [0.0, 0.5, 1.0, 1.0]);
    assert_eq!(begin.colors[1].load_op, LoadOperation::Load);
    assert_eq!(begin.depth_store_op, StoreOperation::DontCare);

    let header: Header = buf.pop_command();
    assert_eq!(header.kind, Kind::Draw);
    let draw: Draw = buf.pop_command();
    assert_eq!(draw.vertex_count, 3);

    let header: Header = buf.pop_command();
    assert_eq!(header.kind, Kind::SamplerUnit);
    let sampler: SamplerUnit = buf.pop_command();
    assert_eq!(sampler.sampler, SamplerHandle::nil());

    let header: Header = buf.pop_command();
    assert_eq!(header.kind, Kind::EndRenderPass);
    let _: EndRenderPass = buf.pop_command();

    let header: Header = buf.pop_command();
    assert_eq!(header.kind, Kind::UpdateBufferData);
    let update: UpdateBufferData = buf.pop_command();
    assert_eq!(buf.pop_data(update.count as usize), &[1, 2, 3]);
    assert!(!buf.has_more_commands());
}

#[test]
#[should_panic]
fn viewport_outside_render_pass() {
    let mut buf = CommandBuffer::default();
    buf.set_viewport(0, 0, 1, 1);
}
