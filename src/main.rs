//! NB-IoT Node Main Application
//!
//! Entry point for the STM32G474 host firmware.
//! Powers up the modem, queries its identity and configures PSM reporting.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::usart::{self, BufferedUart};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use nbiot_ril::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<peripherals::USART1>;
});

static URCS: Channel<CriticalSectionRawMutex, Urc, URC_QUEUE_DEPTH> = Channel::new();
static TX_BUF: StaticCell<[u8; UART_TX_BUFFER_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_RX_BUFFER_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("NB-IoT Node Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // pins::LED_STATUS
    let led = Output::new(p.PA5, Level::Low, Speed::Low);
    // pins::MODEM_PWRKEY
    let mut pwrkey = Output::new(p.PB0, Level::Low, Speed::Low);

    // USART1: PA9 = TX, PA10 = RX
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = MODEM_BAUD_RATE;
    let uart = match BufferedUart::new(
        p.USART1,
        Irqs,
        p.PA10, // pins::MODEM_RX
        p.PA9,  // pins::MODEM_TX
        TX_BUF.init([0; UART_TX_BUFFER_SIZE]),
        RX_BUF.init([0; UART_RX_BUFFER_SIZE]),
        uart_config,
    ) {
        Ok(uart) => uart,
        Err(_) => defmt::panic!("USART1 configuration rejected"),
    };

    info!("USART1 initialized at {} baud", MODEM_BAUD_RATE);

    power_on(&mut pwrkey).await;

    // Spawn background tasks
    spawner.spawn(heartbeat_task(led)).unwrap();
    spawner.spawn(modem_task(uart)).unwrap();
    spawner.spawn(urc_task(URCS.receiver())).unwrap();

    info!("Tasks spawned, entering main loop");

    loop {
        Timer::after(Duration::from_secs(60)).await;
        info!("Main loop tick");
    }
}

/// Pulse PWRKEY and wait for the modem to boot
async fn power_on(pwrkey: &mut Output<'static>) {
    pwrkey.set_high();
    Timer::after(Duration::from_millis(PWRKEY_PULSE_MS)).await;
    pwrkey.set_low();
    Timer::after(Duration::from_millis(MODEM_BOOT_MS)).await;
    info!("Modem powered on");
}

/// Modem task - identifies the modem and enables PSM reporting
#[embassy_executor::task]
async fn modem_task(uart: BufferedUart<'static>) {
    let mut ril = Ril::new(UartModem::new(uart, URCS.sender()));

    while let Err(e) = ril.ping().await {
        warn!("Modem not answering: {}", e);
        Timer::after(Duration::from_secs(1)).await;
    }

    match ril.firmware_version().await {
        Ok(version) => info!("Firmware: {}", version),
        Err(e) => warn!("AT+CGMR: {}", e),
    }
    match ril.imei().await {
        Ok(imei) => info!("IMEI: {}", imei),
        Err(e) => warn!("AT+CGSN: {}", e),
    }
    if let Err(e) = ril.enable_event(PSM_EVENT).await {
        warn!("PSM reporting: {}", e);
    }
    if let Err(e) = ril.set_rai(Rai::NoFurtherData.code()).await {
        warn!("RAI: {}", e);
    }

    loop {
        match ril.battery().await {
            Ok(battery) => {
                info!("Battery: {}", battery);
                if battery.is_low() {
                    warn!("Supply below modem brown-out margin");
                }
            }
            Err(e) => warn!("AT+CBC: {}", e),
        }
        match ril.registration().await {
            Ok(stat) => info!("Registration: {}", stat),
            Err(e) => warn!("AT+CEREG: {}", e),
        }
        Timer::after(Duration::from_secs(60)).await;
    }
}

/// URC task - logs unsolicited modem events
#[embassy_executor::task]
async fn urc_task(urcs: Receiver<'static, CriticalSectionRawMutex, Urc, URC_QUEUE_DEPTH>) {
    loop {
        let urc = urcs.receive().await;
        info!("URC: {}", urc);
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
