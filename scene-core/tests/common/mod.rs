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
//! Shared fixtures for integration tests

#![allow(dead_code)]

use glam::Vec3;
use scene_core::resources::{
    AudioSettings, AudioVoice, GeometryData, GeometryHandle, ResourceProvider, TextureHandle,
};
use scene_core::SceneError;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// What happened to one voice
#[derive(Debug, Default)]
pub struct VoiceLog {
    pub plays: Cell<usize>,
    pub closes: Cell<usize>,
    pub emitter: Cell<Option<Vec3>>,
}

pub struct LoggedVoice(pub Rc<VoiceLog>);

impl AudioVoice for LoggedVoice {
    fn play(&mut self, _settings: &AudioSettings) {
        self.0.plays.set(self.0.plays.get() + 1);
    }

    fn set_emitter_position(&mut self, position: Vec3) {
        self.0.emitter.set(Some(position));
    }

    fn close(&mut self) {
        self.0.closes.set(self.0.closes.get() + 1);
    }
}

/// Provider serving the unit cube under any `*.obj` name
#[derive(Default)]
pub struct TestProvider {
    meshes: HashMap<String, (GeometryHandle, Rc<GeometryData>)>,
    pub voices: Vec<Rc<VoiceLog>>,
    textures: u32,
}

impl ResourceProvider for TestProvider {
    fn geometry(&mut self, name: &str) -> Result<(GeometryHandle, Rc<GeometryData>), SceneError> {
        if !name.ends_with(".obj") {
            return Err(SceneError::MissingResource(name.to_string()));
        }
        let next = GeometryHandle(self.meshes.len() as u32 + 1);
        let (handle, data) = self
            .meshes
            .entry(name.to_string())
            .or_insert_with(|| (next, Rc::new(GeometryData::cuboid())));
        Ok((*handle, Rc::clone(data)))
    }

    fn texture(&mut self, _name: &str) -> Result<TextureHandle, SceneError> {
        self.textures += 1;
        Ok(TextureHandle(self.textures))
    }

    fn cube_map(&mut self, faces: &[&str]) -> Result<TextureHandle, SceneError> {
        if faces.len() != 6 {
            return Err(SceneError::MissingResource(faces.join(",")));
        }
        self.textures += 1;
        Ok(TextureHandle(self.textures))
    }

    fn audio(&mut self, _name: &str) -> Result<Box<dyn AudioVoice>, SceneError> {
        let log = Rc::new(VoiceLog::default());
        self.voices.push(Rc::clone(&log));
        Ok(Box::new(LoggedVoice(log)))
    }
}
