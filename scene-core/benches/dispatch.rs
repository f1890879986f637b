// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for per-frame system dispatch
//!
//! Measures a full `update_delta_time` + `action_systems` frame for scenes of
//! increasing size, with the movement and animation systems registered.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec3;
use scene_core::ecs::components::{Animation, Position, Transform, Velocity};
use scene_core::systems::{AnimatorSystem, PhysicsSystem};
use scene_core::{Entity, EntityManager, SystemManager};

fn scene(count: usize) -> EntityManager {
    let mut manager = EntityManager::new();
    for i in 0..count {
        let mut entity = Entity::new(format!("entity_{}", i));
        entity
            .add_component(Position::new(Vec3::splat(i as f32)))
            .expect("fresh entity");
        if i % 2 == 0 {
            entity
                .add_component(Velocity::new(1.0, 0.0, -1.0))
                .expect("fresh entity");
        }
        if i % 3 == 0 {
            entity.add_component(Transform::default()).expect("fresh entity");
            entity
                .add_component(Animation::new(Vec3::Y, 0.01))
                .expect("fresh entity");
        }
        manager.add(entity).expect("unique names");
    }
    manager
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_dispatch");

    for count in [100usize, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        let mut entities = scene(*count);
        let mut systems = SystemManager::new();
        systems.add_system(PhysicsSystem::new());
        systems.add_system(AnimatorSystem::new());

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                systems.update_delta_time(black_box(1.0 / 60.0));
                systems.action_systems(&mut entities);
            });
        });
    }

    group.finish();
}

fn bench_mask_query(c: &mut Criterion) {
    let entities = scene(10000);
    let mask = PhysicsSystem::MASK;
    c.bench_function("find_all_with_mask_10000", |b| {
        b.iter(|| black_box(entities.find_all_with_mask(mask).len()));
    });
}

criterion_group!(benches, bench_frame, bench_mask_query);
criterion_main!(benches);
