// Vulkan surface for the egui viewer: setup, swapchain rebuilds, acquire/present.

use std::sync::Arc;

use tracing::{error, info, warn};
use vulkano::{
    device::{
        physical::{PhysicalDevice, PhysicalDeviceType},
        Device, DeviceCreateInfo, DeviceExtensions, Queue, QueueCreateInfo, QueueFlags,
    },
    image::{view::ImageView, Image, ImageUsage},
    instance::{Instance, InstanceCreateFlags, InstanceCreateInfo},
    swapchain::{self, Surface, Swapchain, SwapchainCreateInfo, SwapchainPresentInfo},
    sync::{self, GpuFuture},
    Validated, VulkanError, VulkanLibrary,
};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::Window,
};

use crate::RenderError;

pub const WINDOW_TITLE: &str = "Duct Flow: Continuity vs Bernoulli Velocity Profiles";

pub struct Renderer {
    pub window: Arc<Window>,
    pub surface: Arc<Surface>,
    pub queue: Arc<Queue>,
    device: Arc<Device>,
    swapchain: Arc<Swapchain>,
    pub image_views: Vec<Arc<ImageView>>,
    /// Swapchain no longer matches the window and must be rebuilt.
    pub recreate_swapchain: bool,
    /// Last rebuild attempt failed; wait for a resize before trying again.
    rebuild_failed: bool,
    previous_frame_end: Option<Box<dyn GpuFuture>>,
}

/// Lower is better.
fn device_rank(device_type: PhysicalDeviceType) -> u8 {
    match device_type {
        PhysicalDeviceType::DiscreteGpu => 0,
        PhysicalDeviceType::IntegratedGpu => 1,
        PhysicalDeviceType::VirtualGpu => 2,
        PhysicalDeviceType::Cpu => 3,
        PhysicalDeviceType::Other => 4,
        _ => 5,
    }
}

fn is_minimised(size: PhysicalSize<u32>) -> bool {
    size.width == 0 || size.height == 0
}

/// Whether a skipped or out-of-date frame should schedule another redraw
/// on its own instead of waiting for input.
pub fn should_retry_frame(
    rebuild_pending: bool,
    rebuild_failed: bool,
    size: PhysicalSize<u32>,
) -> bool {
    rebuild_pending && !rebuild_failed && !is_minimised(size)
}

fn create_instance(event_loop: &ActiveEventLoop) -> Result<Arc<Instance>, RenderError> {
    let library =
        VulkanLibrary::new().map_err(|e| RenderError::gpu("load the Vulkan library", e))?;
    let enabled_extensions = Surface::required_extensions(event_loop)
        .map_err(|e| RenderError::gpu("query surface extensions", e))?;
    Instance::new(
        library,
        InstanceCreateInfo {
            flags: InstanceCreateFlags::ENUMERATE_PORTABILITY,
            enabled_extensions,
            ..Default::default()
        },
    )
    .map_err(|e| RenderError::gpu("create Vulkan instance", e))
}

/// Best-ranked device that can both draw and present to `surface`, with the
/// index of a queue family that does both.
fn select_device(
    instance: &Arc<Instance>,
    surface: &Surface,
    extensions: &DeviceExtensions,
) -> Result<(Arc<PhysicalDevice>, u32), RenderError> {
    let candidates = instance
        .enumerate_physical_devices()
        .map_err(|e| RenderError::gpu("enumerate physical devices", e))?;
    candidates
        .filter(|p| p.supported_extensions().contains(extensions))
        .filter_map(|p| {
            let family = p.queue_family_properties().iter().enumerate().position(|(i, q)| {
                q.queue_flags.intersects(QueueFlags::GRAPHICS)
                    && p.surface_support(i as u32, surface).unwrap_or(false)
            })?;
            Some((p, family as u32))
        })
        .min_by_key(|(p, _)| device_rank(p.properties().device_type))
        .ok_or(RenderError::NoSuitableDevice)
}

fn create_views(images: &[Arc<Image>]) -> Result<Vec<Arc<ImageView>>, RenderError> {
    images
        .iter()
        .map(|image| {
            ImageView::new_default(image.clone())
                .map_err(|e| RenderError::gpu("create swapchain image view", e))
        })
        .collect()
}

impl Renderer {
    pub fn new(event_loop: &ActiveEventLoop) -> Result<Self, RenderError> {
        let instance = create_instance(event_loop)?;
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(WINDOW_TITLE)
                    .with_inner_size(LogicalSize::new(1280u32, 860u32)),
            )?,
        );
        let surface = Surface::from_window(instance.clone(), window.clone())
            .map_err(|e| RenderError::gpu("create surface", e))?;

        let extensions = DeviceExtensions {
            khr_swapchain: true,
            ..DeviceExtensions::empty()
        };
        let (physical, queue_family_index) = select_device(&instance, &surface, &extensions)?;
        let properties = physical.properties();
        info!(
            device = %properties.device_name,
            device_type = ?properties.device_type,
            "selected GPU"
        );

        let queue_create_infos = vec![QueueCreateInfo {
            queue_family_index,
            ..Default::default()
        }];
        let (device, mut queues) = Device::new(
            physical.clone(),
            DeviceCreateInfo {
                queue_create_infos,
                enabled_extensions: extensions,
                ..Default::default()
            },
        )
        .map_err(|e| RenderError::gpu("create logical device", e))?;
        let queue = queues.next().ok_or(RenderError::NoSuitableDevice)?;

        let capabilities = physical
            .surface_capabilities(&surface, Default::default())
            .map_err(|e| RenderError::gpu("query surface capabilities", e))?;
        let (image_format, _) = physical
            .surface_formats(&surface, Default::default())
            .map_err(|e| RenderError::gpu("query surface formats", e))?
            .into_iter()
            .next()
            .ok_or_else(|| RenderError::gpu("pick a surface format", "none reported"))?;
        let composite_alpha = capabilities
            .supported_composite_alpha
            .into_iter()
            .next()
            .ok_or_else(|| RenderError::gpu("pick a composite alpha mode", "none supported"))?;

        let size = window.inner_size();
        let (swapchain, images) = Swapchain::new(
            device.clone(),
            surface.clone(),
            SwapchainCreateInfo {
                min_image_count: capabilities.min_image_count.max(2),
                image_format,
                image_extent: [size.width, size.height],
                image_usage: ImageUsage::COLOR_ATTACHMENT,
                composite_alpha,
                ..Default::default()
            },
        )
        .map_err(|e| RenderError::gpu("create swapchain", e))?;
        let image_views = create_views(&images)?;

        Ok(Renderer {
            previous_frame_end: Some(sync::now(device.clone()).boxed()),
            window,
            surface,
            queue,
            device,
            swapchain,
            image_views,
            recreate_swapchain: false,
            rebuild_failed: false,
        })
    }

    pub fn swapchain_format(&self) -> vulkano::format::Format {
        self.swapchain.image_format()
    }

    /// Mark the swapchain stale after a resize. Clears any earlier rebuild
    /// failure so the next frame tries again.
    pub fn invalidate_swapchain(&mut self) {
        self.recreate_swapchain = true;
        self.rebuild_failed = false;
    }

    /// True when the last frame was skipped or presented to a stale
    /// swapchain and a rebuild can be attempted right away.
    pub fn needs_retry(&self) -> bool {
        should_retry_frame(
            self.recreate_swapchain,
            self.rebuild_failed,
            self.window.inner_size(),
        )
    }

    fn rebuild_swapchain(&mut self) -> Result<(), RenderError> {
        let size = self.window.inner_size();
        if is_minimised(size) {
            return Ok(());
        }
        let (swapchain, images) = self
            .swapchain
            .recreate(SwapchainCreateInfo {
                image_extent: [size.width, size.height],
                ..self.swapchain.create_info()
            })
            .map_err(|e| RenderError::gpu("recreate swapchain", e))?;

        self.image_views = create_views(&images)?;
        self.swapchain = swapchain;
        self.recreate_swapchain = false;
        Ok(())
    }

    /// Acquire the next swapchain image, rebuilding the swapchain first if it
    /// is stale. None means this frame is skipped.
    pub fn begin_frame(&mut self) -> Option<(u32, swapchain::SwapchainAcquireFuture)> {
        if let Some(future) = self.previous_frame_end.as_mut() {
            future.cleanup_finished();
        }

        if self.recreate_swapchain {
            if let Err(e) = self.rebuild_swapchain() {
                error!("{e}");
                self.rebuild_failed = true;
                return None;
            }
            if is_minimised(self.window.inner_size()) {
                return None;
            }
        }

        match swapchain::acquire_next_image(self.swapchain.clone(), None).map_err(Validated::unwrap)
        {
            Ok((image_index, suboptimal, acquire_future)) => {
                if suboptimal {
                    self.recreate_swapchain = true;
                }
                Some((image_index, acquire_future))
            }
            Err(VulkanError::OutOfDate) => {
                self.recreate_swapchain = true;
                None
            }
            Err(e) => {
                error!("failed to acquire next image: {e}");
                None
            }
        }
    }

    /// Keep the submitted work around so the next frame can wait on it.
    pub fn end_frame(&mut self, after_future: Box<dyn GpuFuture>) {
        self.previous_frame_end = Some(after_future);
    }

    pub fn take_previous_frame_end(&mut self) -> Box<dyn GpuFuture> {
        self.previous_frame_end
            .take()
            .unwrap_or_else(|| sync::now(self.device.clone()).boxed())
    }

    pub fn present(
        &mut self,
        after_future: Box<dyn GpuFuture>,
        image_index: u32,
    ) -> Box<dyn GpuFuture> {
        let info = SwapchainPresentInfo::swapchain_image_index(self.swapchain.clone(), image_index);
        let flushed = after_future
            .then_swapchain_present(self.queue.clone(), info)
            .then_signal_fence_and_flush()
            .map_err(Validated::unwrap);

        match flushed {
            Ok(future) => future.boxed(),
            Err(VulkanError::OutOfDate) => {
                self.recreate_swapchain = true;
                sync::now(self.device.clone()).boxed()
            }
            Err(e) => {
                warn!("dropped frame, failed to flush future: {e}");
                sync::now(self.device.clone()).boxed()
            }
        }
    }
}
