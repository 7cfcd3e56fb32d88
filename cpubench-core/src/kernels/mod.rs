//! Workload kernels, one function per suite entry.
//!
//! Each kernel takes its sizing from [`WorkloadParams`](crate::WorkloadParams),
//! times itself internally and returns a [`BenchmarkResult`](crate::BenchmarkResult)
//! with a throughput figure and a validity check over the computed output.
//! Single and multi-core variants of the same workload share the helpers below.

pub mod multi;
pub mod single;

use serde_json::Value;

// ---------------------------------------------------------------------------
// Ray tracing scene

#[derive(Clone, Copy)]
pub(crate) struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub(crate) fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    fn scale(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    fn normalize(self) -> Vec3 {
        let len = self.dot(self).sqrt();
        if len > 0.0 {
            self.scale(1.0 / len)
        } else {
            Vec3::new(0.0, 0.0, 0.0)
        }
    }
}

pub(crate) struct Ray {
    origin: Vec3,
    direction: Vec3,
}

pub(crate) struct Sphere {
    center: Vec3,
    radius: f64,
}

impl Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin.sub(self.center);
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);
        if t1 > 0.0 {
            Some(t1)
        } else if t2 > 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}

/// Three-sphere scene used by both ray tracing kernels.
pub(crate) fn test_scene() -> Vec<Sphere> {
    vec![
        Sphere {
            center: Vec3::new(0.0, 0.0, -1.0),
            radius: 0.5,
        },
        Sphere {
            center: Vec3::new(1.0, 0.0, -1.5),
            radius: 0.3,
        },
        Sphere {
            center: Vec3::new(-1.0, -0.5, -1.2),
            radius: 0.4,
        },
    ]
}

/// Recursive ray trace with reflection, bounded by `depth`.
pub(crate) fn trace_ray(ray: &Ray, spheres: &[Sphere], depth: u32) -> Vec3 {
    if depth == 0 {
        return Vec3::new(0.0, 0.0, 0.0);
    }

    let mut closest_t = f64::INFINITY;
    let mut hit_sphere: Option<&Sphere> = None;
    for sphere in spheres {
        if let Some(t) = sphere.intersect(ray) {
            if t < closest_t {
                closest_t = t;
                hit_sphere = Some(sphere);
            }
        }
    }

    let Some(sphere) = hit_sphere else {
        // Sky background.
        return Vec3::new(0.5, 0.7, 1.0);
    };

    let hit_point = ray.origin.add(ray.direction.scale(closest_t));
    let normal = hit_point.sub(sphere.center).normalize();
    let reflected_dir = ray
        .direction
        .sub(normal.scale(2.0 * ray.direction.dot(normal)))
        .normalize();
    let reflected_ray = Ray {
        origin: hit_point.add(normal.scale(0.01)),
        direction: reflected_dir,
    };
    let reflected = trace_ray(&reflected_ray, spheres, depth - 1);

    Vec3::new(
        (normal.x + 1.0) * 0.5 + reflected.x * 0.3,
        (normal.y + 1.0) * 0.5 + reflected.y * 0.3,
        (normal.z + 1.0) * 0.5 + reflected.z * 0.3,
    )
}

/// Camera ray through pixel (x, y) of a width x height image.
pub(crate) fn pixel_ray(x: u32, y: u32, width: u32, height: u32) -> Ray {
    Ray {
        origin: Vec3::new(0.0, 0.0, 0.0),
        direction: Vec3::new(
            (x as f64 - width as f64 / 2.0) / (width as f64 / 2.0),
            (y as f64 - height as f64 / 2.0) / (height as f64 / 2.0),
            -1.0,
        )
        .normalize(),
    }
}

// ---------------------------------------------------------------------------
// Run-length encoding

/// RLE compression into (count, byte) pairs, runs capped at 255.
pub(crate) fn compress_rle(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let current = data[i];
        let mut count = 1;
        while i + count < data.len() && data[i + count] == current && count < 255 {
            count += 1;
        }
        compressed.push(count as u8);
        compressed.push(current);
        i += count;
    }
    compressed
}

/// Inverse of [`compress_rle`]. Trailing odd bytes are ignored.
pub(crate) fn decompress_rle(compressed: &[u8]) -> Vec<u8> {
    let mut decompressed = Vec::new();
    for pair in compressed.chunks_exact(2) {
        let count = pair[0] as usize;
        let value = pair[1];
        decompressed.extend(std::iter::repeat(value).take(count));
    }
    decompressed
}

// ---------------------------------------------------------------------------
// JSON workload

/// Builds a nested JSON document of roughly `size_target` bytes.
pub(crate) fn generate_json_document(size_target: usize) -> String {
    let mut result = String::from("{\"data\":[");
    let mut counter = 0u64;
    loop {
        let obj = format!(
            "{{\"id\":{},\"name\":\"obj{}\",\"nested\":{{\"value\":{},\"array\":[1,2,3,4,5]}}}},",
            counter,
            counter,
            counter % 1000
        );
        if result.len() + obj.len() > size_target {
            break;
        }
        result.push_str(&obj);
        counter += 1;
    }
    if result.ends_with(',') {
        result.pop();
    }
    result.push_str("]}");
    result
}

/// Counts every value in a JSON tree, containers included.
pub(crate) fn count_json_elements(value: &Value) -> u64 {
    match value {
        Value::Object(map) => 1 + map.values().map(count_json_elements).sum::<u64>(),
        Value::Array(arr) => 1 + arr.iter().map(count_json_elements).sum::<u64>(),
        _ => 1,
    }
}

// ---------------------------------------------------------------------------
// N-Queens

/// Counts completions of a partially-filled board from `row` downward.
pub(crate) fn nqueens_count(
    row: usize,
    n: usize,
    cols: &mut [bool],
    diag1: &mut [bool],
    diag2: &mut [bool],
) -> u64 {
    if row == n {
        return 1;
    }
    let mut count = 0;
    for col in 0..n {
        let d1 = row + col;
        let d2 = n - 1 + col - row;
        if !cols[col] && !diag1[d1] && !diag2[d2] {
            cols[col] = true;
            diag1[d1] = true;
            diag2[d2] = true;
            count += nqueens_count(row + 1, n, cols, diag1, diag2);
            cols[col] = false;
            diag1[d1] = false;
            diag2[d2] = false;
        }
    }
    count
}
