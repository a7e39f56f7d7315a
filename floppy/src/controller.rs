//! # 控制器协议
//!
//! 每写一个命令字节、读一个结果字节之前都要轮询 MSR 的 RQM 位。
//! 命令发出后本应等待 IRQ6，但目标环境中的中断投递并不可靠，
//! 所以“等待中断”退化为固定时长的延时，之后再读取并检查状态。
//!
//! 一条“磁道”指一个柱面：两个磁头各 18 个扇区，多磁道模式下一次读写，
//! DMA 计数在 16KiB 处截断。

use enumflags2::BitFlags;
use track_dev::{DeviceError, Stage, StagingBuffer, TrackDevice};

use crate::cmos::{self, DriveType};
use crate::config::*;
use crate::dma;
use crate::port::{Delay, PortIo};
use crate::regs::{dor_enabled, dor_motor_a, Command, Dor, Msr, St0, St1, St2};

/// 传输方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 介质 -> 内存
    Read,
    /// 内存 -> 介质
    Write,
}

impl Direction {
    #[inline]
    fn command(self) -> Command {
        match self {
            Direction::Read => Command::ReadData,
            Direction::Write => Command::WriteData,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Off,
    On,
}

/// READ/WRITE DATA 的7个结果字节
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferStatus {
    pub st0: u8,
    pub st1: u8,
    pub st2: u8,
    /// 以下三项是控制器更新过的 C/H/R，规则相当费解
    pub cylinder: u8,
    pub head: u8,
    pub sector: u8,
    /// 扇区大小编码，应与编程时一致
    pub size_code: u8,
}

impl TransferStatus {
    /// 命令是否正常结束且没有报告任何错误
    pub fn is_ok(&self) -> bool {
        let st0 = BitFlags::<St0>::from_bits_truncate(self.st0);
        !st0.intersects(St0::INT_CODE0 | St0::INT_CODE1)
            && BitFlags::<St1>::from_bits_truncate(self.st1).is_empty()
            && BitFlags::<St2>::from_bits_truncate(self.st2).is_empty()
            && self.size_code == SECTOR_SIZE_CODE
    }
}

/// 0号驱动器的控制器
#[derive(Debug)]
pub struct FloppyController<P, D> {
    ports: P,
    delay: D,
    config: Config,
    motor: MotorState,
}

impl<P: PortIo, D: Delay> FloppyController<P, D> {
    pub fn new(ports: P, delay: D, config: Config) -> Self {
        Self {
            ports,
            delay,
            config,
            motor: MotorState::Off,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn motor_state(&self) -> MotorState {
        self.motor
    }

    #[inline]
    pub fn ports(&self) -> &P {
        &self.ports
    }

    #[inline]
    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn into_parts(self) -> (P, D) {
        (self.ports, self.delay)
    }

    /// 检测驱动器、复位并校准
    pub fn install(&mut self) -> Result<DriveType, DeviceError> {
        let (drive0, _) = self.detect_drives();
        log::info!("floppy drive 0: {drive0}");

        self.reset()?;
        log::info!("floppy reset");
        self.calibrate()?;
        log::info!("floppy calibrated");

        Ok(drive0)
    }

    /// 向 CMOS 询问两个驱动器的类型
    pub fn detect_drives(&mut self) -> (DriveType, DriveType) {
        cmos::detect(&mut self.ports)
    }

    /// 复位控制器，设定传输速率与磁头时序，再校准
    pub fn reset(&mut self) -> Result<(), DeviceError> {
        // 先禁用再启用控制器，马达随之全部关闭
        self.write_dor(BitFlags::empty());
        self.write_dor(dor_enabled());
        self.motor = MotorState::Off;

        self.wait_for_interrupt();
        // 复位产生的中断状态，读出即可
        self.sense_interrupt()?;

        let ccr = self.port(CCR);
        self.ports.write_u8(ccr, TRANSFER_RATE_500K);

        //  - 第1字节: bits[7:4] = 步进速率, bits[3:0] = 磁头卸载时间
        //  - 第2字节: bits[7:1] = 磁头加载时间, bit[0] = 不用 DMA
        self.write_cmd(Command::Specify as u8)?;
        self.write_cmd(SPECIFY_STEP_UNLOAD)?;
        self.write_cmd(SPECIFY_LOAD_DMA)?;

        self.calibrate()
    }

    /// 把磁头移到0号柱面
    pub fn calibrate(&mut self) -> Result<(), DeviceError> {
        self.motor(MotorState::On);
        let result = self.retry_position(Stage::Calibrate, 0, |ctl| {
            // 参数为驱动器号，只支持0号
            ctl.write_cmd(Command::Recalibrate as u8)?;
            ctl.write_cmd(0)
        });
        self.motor(MotorState::Off);
        result
    }

    /// 让 `head` 号磁头寻道到 `cylinder`
    pub fn seek(&mut self, cylinder: u8, head: u8) -> Result<(), DeviceError> {
        self.motor(MotorState::On);
        let result = self.retry_position(Stage::Seek, cylinder, |ctl| {
            // 第1字节 bit[1:0] = 驱动器, bit[2] = 磁头
            ctl.write_cmd(Command::Seek as u8)?;
            ctl.write_cmd(head << 2)?;
            ctl.write_cmd(cylinder)
        });
        self.motor(MotorState::Off);
        result
    }

    /// 马达只在关到开的跳变时上电并等待起转；关闭立即生效，没有减速等待
    pub fn motor(&mut self, state: MotorState) {
        match (self.motor, state) {
            (MotorState::Off, MotorState::On) => {
                self.write_dor(dor_motor_a());
                self.delay.sleep_ms(self.config.motor_spinup_ms);
            }
            (MotorState::On, MotorState::Off) => self.write_dor(dor_enabled()),
            _ => {}
        }
        self.motor = state;
    }

    /// 对 `cylinder` 做一次整柱面传输，数据位于 `address` 处的 DMA 区域
    pub fn transfer(
        &mut self,
        cylinder: u8,
        dir: Direction,
        address: usize,
    ) -> Result<TransferStatus, DeviceError> {
        // 两个磁头都要寻道
        self.seek(cylinder, 0)?;
        self.seek(cylinder, 1)?;

        let attempts = self.config.transfer_retries;
        for attempt in 1..=attempts {
            self.motor(MotorState::On);
            dma::program(&mut self.ports, dir, address, DMA_LENGTH);

            // 给寻道之后留点稳定时间
            self.delay.sleep_ms(self.config.settle_ms);

            let status = match self.issue_transfer(cylinder, dir) {
                Ok(status) => status,
                Err(err) => {
                    self.motor(MotorState::Off);
                    return Err(err);
                }
            };
            log::trace!("floppy: {dir:?} cylinder {cylinder}: {status:?}");

            // 默认不检查结果，首轮即视为成功
            if !self.config.verify_transfer || status.is_ok() {
                self.motor(MotorState::Off);
                return Ok(status);
            }
            log::warn!(
                "floppy: {dir:?} cylinder {cylinder} attempt {attempt} failed: {status:?}"
            );
        }

        log::error!("floppy: transfer {attempts} retries exhausted");
        self.motor(MotorState::Off);
        Err(DeviceError::Timeout {
            stage: Stage::Transfer,
            attempts,
        })
    }

    #[inline]
    pub fn read_cylinder(
        &mut self,
        cylinder: u8,
        buf: &mut StagingBuffer,
    ) -> Result<(), DeviceError> {
        self.transfer(cylinder, Direction::Read, buf.dma_address())
            .map(|_| ())
    }

    #[inline]
    pub fn write_cylinder(
        &mut self,
        cylinder: u8,
        buf: &StagingBuffer,
    ) -> Result<(), DeviceError> {
        self.transfer(cylinder, Direction::Write, buf.dma_address())
            .map(|_| ())
    }
}

impl<P: PortIo, D: Delay> TrackDevice for FloppyController<P, D> {
    fn read_track(&mut self, track: usize, buf: &mut StagingBuffer) -> Result<(), DeviceError> {
        let cylinder = u8::try_from(track).map_err(|_| DeviceError::OutOfRange { track })?;
        self.read_cylinder(cylinder, buf)
    }

    fn write_track(&mut self, track: usize, buf: &StagingBuffer) -> Result<(), DeviceError> {
        let cylinder = u8::try_from(track).map_err(|_| DeviceError::OutOfRange { track })?;
        self.write_cylinder(cylinder, buf)
    }
}

impl<P: PortIo, D: Delay> FloppyController<P, D> {
    fn port(&self, reg: u16) -> u16 {
        self.config.base + reg
    }

    fn write_dor(&mut self, dor: BitFlags<Dor>) {
        let port = self.port(DOR);
        self.ports.write_u8(port, dor.bits());
    }

    /// 轮询直到 FIFO 就绪，有次数上限
    fn wait_ready(&mut self) -> Result<(), DeviceError> {
        let port = self.port(MSR);
        for _ in 0..self.config.ready_spins {
            let msr = BitFlags::<Msr>::from_bits_truncate(self.ports.read_u8(port));
            if msr.contains(Msr::RQM) {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        log::error!("floppy: controller never became ready");
        Err(DeviceError::Timeout {
            stage: Stage::Ready,
            attempts: self.config.ready_spins,
        })
    }

    fn write_cmd(&mut self, byte: u8) -> Result<(), DeviceError> {
        self.wait_ready()?;
        let port = self.port(FIFO);
        self.ports.write_u8(port, byte);
        Ok(())
    }

    fn read_data(&mut self) -> Result<u8, DeviceError> {
        self.wait_ready()?;
        let port = self.port(FIFO);
        Ok(self.ports.read_u8(port))
    }

    /// 本应等待 IRQ6，现为固定延时
    fn wait_for_interrupt(&mut self) {
        self.delay.sleep_ms(self.config.irq_wait_ms);
    }

    /// SENSE INTERRUPT，返回 (st0, 当前柱面)
    fn sense_interrupt(&mut self) -> Result<(u8, u8), DeviceError> {
        self.write_cmd(Command::SenseInterrupt as u8)?;
        let st0 = self.read_data()?;
        let cylinder = self.read_data()?;
        Ok((st0, cylinder))
    }

    /// 反复发出定位命令，直到控制器报告的柱面等于 `target`
    fn retry_position(
        &mut self,
        stage: Stage,
        target: u8,
        mut issue: impl FnMut(&mut Self) -> Result<(), DeviceError>,
    ) -> Result<(), DeviceError> {
        let attempts = self.config.seek_retries;
        for _ in 0..attempts {
            issue(self)?;
            self.wait_for_interrupt();
            let (st0, cylinder) = self.sense_interrupt()?;
            if cylinder == target {
                return Ok(());
            }
            log::debug!(
                "floppy: {stage} wanted cylinder {target}, got {cylinder} (st0={st0:#04x})"
            );
        }

        log::error!("floppy: {stage} {attempts} retries exhausted");
        Err(DeviceError::Timeout { stage, attempts })
    }

    /// 发出 READ/WRITE DATA 并收取结果
    fn issue_transfer(
        &mut self,
        cylinder: u8,
        dir: Direction,
    ) -> Result<TransferStatus, DeviceError> {
        self.write_cmd(dir.command() as u8)?;
        self.write_cmd(0)?; // 0:0:0:0:0:HD:US1:US0 = 磁头与驱动器
        self.write_cmd(cylinder)?;
        self.write_cmd(0)?; // 起始磁头，与上面一致
        self.write_cmd(1)?; // 起始扇区，从1开始计数
        self.write_cmd(SECTOR_SIZE_CODE)?;
        self.write_cmd(SECTORS_PER_TRACK)?;
        self.write_cmd(GAP3_LENGTH)?;
        self.write_cmd(DATA_LENGTH)?;

        // 这里不能 SENSE INTERRUPT
        self.wait_for_interrupt();

        Ok(TransferStatus {
            st0: self.read_data()?,
            st1: self.read_data()?,
            st2: self.read_data()?,
            cylinder: self.read_data()?,
            head: self.read_data()?,
            sector: self.read_data()?,
            size_code: self.read_data()?,
        })
    }
}
